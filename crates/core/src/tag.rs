use mapperlens_api::SqlTag;

/// Keywords checked in priority order; the first one contained in the method
/// name picks the tag.
const KEYWORD_ORDER: [SqlTag; 4] = [SqlTag::Select, SqlTag::Insert, SqlTag::Delete, SqlTag::Update];

/// Guesses the statement element for a method that has none yet.
///
/// Names without any keyword (`findAllActive`) fall back to `<sql>`.
pub fn infer_tag(method_name: &str) -> SqlTag {
    let lower = method_name.to_lowercase();
    KEYWORD_ORDER
        .into_iter()
        .find(|tag| lower.contains(tag.as_str()))
        .unwrap_or(SqlTag::Sql)
}
