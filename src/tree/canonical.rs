//! Canonical blob rendering
//!
//! A blob's text is a pure function of its member set: object members are
//! ordered by name bytes, array members by index. Names and string values are
//! JSON-escaped, so every blob is valid JSON.

use crate::tree::flatten::Leaf;
use crate::tree::group::{BlobLayout, Group};
use crate::tree::path;
use crate::value::Scalar;
use serde::{Deserialize, Serialize};

/// How scalar members are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarEncoding {
    /// Every scalar becomes a quoted string of its text (`1` → `"1"`)
    #[default]
    Text,
    /// Numbers, booleans and null stay JSON literals
    Native,
}

impl std::str::FromStr for ScalarEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ScalarEncoding::Text),
            "native" => Ok(ScalarEncoding::Native),
            other => Err(format!(
                "Invalid scalar encoding: {} (must be 'text' or 'native')",
                other
            )),
        }
    }
}

/// Canonical text of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub layout: BlobLayout,
    pub text: String,
}

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Renders group members into canonical text
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer {
    encoding: ScalarEncoding,
}

impl Canonicalizer {
    pub fn new(encoding: ScalarEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> ScalarEncoding {
        self.encoding
    }

    /// Render a group using the layout implied by its member names
    pub fn canonicalize(&self, group: &Group) -> Blob {
        self.render(group.layout(), &group.members)
    }

    /// Render members with an explicit layout
    ///
    /// Array members must all carry index names; any that do not sort after
    /// the indexed ones by name.
    pub fn render(&self, layout: BlobLayout, members: &[(String, Leaf)]) -> Blob {
        let mut ordered: Vec<&(String, Leaf)> = members.iter().collect();
        let text = match layout {
            BlobLayout::Object => {
                ordered.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                let body = ordered
                    .iter()
                    .map(|(name, leaf)| format!("{}:{}", quote(name), self.render_leaf(leaf)))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{{{}}}", body)
            }
            BlobLayout::Array => {
                ordered.sort_by(|a, b| {
                    let ia = path::parse_index(&a.0).unwrap_or(u64::MAX);
                    let ib = path::parse_index(&b.0).unwrap_or(u64::MAX);
                    ia.cmp(&ib).then_with(|| a.0.cmp(&b.0))
                });
                let body = ordered
                    .iter()
                    .map(|(_, leaf)| self.render_leaf(leaf))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("[{}]", body)
            }
        };
        Blob { layout, text }
    }

    fn render_leaf(&self, leaf: &Leaf) -> String {
        match leaf {
            Leaf::Link(id) => quote(&id.to_string()),
            Leaf::Scalar(scalar) => match (self.encoding, scalar) {
                (ScalarEncoding::Text, scalar) => quote(&scalar.to_text()),
                (ScalarEncoding::Native, Scalar::String(s)) => quote(s),
                (ScalarEncoding::Native, scalar) => scalar.to_text(),
            },
        }
    }
}

/// JSON string literal for `s`
fn quote(s: &str) -> String {
    // Serializing a &str cannot fail.
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
