use nutype::nutype;

/// Canonical id of a facet value (manufacturer or device type).
///
/// Trimmed and lower-cased on construction, so two spellings that differ only
/// in case or surrounding whitespace produce the same key. An empty value is
/// rejected; callers model "no selection" as `Option<FacetKey>::None`.
#[nutype(
    sanitize(trim, lowercase),
    validate(not_empty),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct FacetKey(String);

impl FacetKey {
    /// Parses a raw facet value, mapping blank input to `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::try_new(raw).ok()
    }
}
