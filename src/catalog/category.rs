use crate::extraction::PATH_SEPARATOR;

/// Separator that may appear inside the leading (vehicle) segment
const MAIN_CATEGORY_SEPARATOR: &str = " / ";

/// Rewrite a raw category path into the catalog's category line.
///
/// The path is split once on the first `" > "`. Only the part before it has
/// `" / "` replaced by `" > "`; the remainder is kept verbatim. A path with
/// no separator is returned unchanged.
pub fn rewrite_category_path(raw: &str) -> String {
    match raw.split_once(PATH_SEPARATOR) {
        Some((main, rest)) => {
            let main = main.replace(MAIN_CATEGORY_SEPARATOR, PATH_SEPARATOR);
            format!("{main}{PATH_SEPARATOR}{rest}")
        }
        None => raw.to_string(),
    }
}
