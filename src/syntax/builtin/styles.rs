//! Style tag classifications for the generated grammars

use crate::error::Result;
use crate::syntax::style::StyleMap;

const STYLES: &[(&str, &str)] = &[
    // SBSS
    ("SBSS_IMPORT", "keyword.other"),
    ("SBSS_IF_ELIF", "keyword.control"),
    ("SBSS_ELSE_END", "keyword.control"),
    ("SBSS_SELECTOR", "entity.name.tag"),
    // SBML
    ("SBML_IMPORT", "keyword.other"),            // =import
    ("SBML_BEGIN", "keyword.other"),             // =begin
    ("SBML_END", "keyword.other"),               // =end
    ("SBML_SECTION_NAME", "entity.name.type markup.italic"),
    ("SBML_IF_ELIF", "keyword.other"),           // =if =elif
    ("SBML_ELSE", "keyword.other"),              // =else
    ("SBML_BLOCK_OBJECT", "keyword.control"),    // =object
    ("SBML_STYLE", "keyword.control"),           // =style
    ("SBML_INLINE_OBJECT", "keyword.other"),     // =(:)=
    ("SBML_OBJECT_TYPE", "entity.name.type"),
    ("SBML_STYLE_MARK", "keyword.other"),        // =[|]=
    ("SBML_STYLE_NAME", "entity.name.type"),
    ("SBML_ANCHOR_MARK", "keyword.other"),       // =(anchor|)=
    ("SBML_ANCHOR_NAME", "string"),
    // Common
    ("COMMENT", "comment.line"),
    ("PROP_NAME", "entity.other.attribute-name"),
    ("PROP_VALUE", "string"),
    ("PROP_SEP", "keyword.operator"),
    ("INVALID", "invalid.illegal"),
    ("VARIABLE", "string markup.italic"),
    ("FILENAME", "string"),
    ("LENGTH", "constant.numeric"),
    ("OPERATOR", "keyword.operator"),
];

/// Build the style map used for both languages
pub fn style_map() -> Result<StyleMap> {
    StyleMap::from_pairs(STYLES.iter().copied())
}
