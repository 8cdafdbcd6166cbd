//! Program point names: `function:::TAG`, with the ordering used for
//! processing and emission.

use std::cmp::Ordering;
use std::fmt;

use invar_core::constants::{CLASS_TAG, ENTER_TAG, EXIT_TAG, OBJECT_TAG, PPT_TAG_SEPARATOR};

/// The tag after the `:::` separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointTag {
    Class,
    Object,
    Enter,
    /// The combined exit of a function.
    Exit,
    /// One exit site of a function, e.g. `EXIT22`.
    NumberedExit(u32),
    Other(String),
}

impl PointTag {
    fn parse(tag: &str) -> Self {
        match tag {
            CLASS_TAG => Self::Class,
            OBJECT_TAG => Self::Object,
            ENTER_TAG => Self::Enter,
            EXIT_TAG => Self::Exit,
            _ => tag
                .strip_prefix(EXIT_TAG)
                .and_then(|n| n.parse::<u32>().ok())
                .map(Self::NumberedExit)
                .unwrap_or_else(|| Self::Other(tag.to_string())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Class => 0,
            Self::Object => 1,
            Self::Enter => 2,
            Self::Exit => 3,
            Self::NumberedExit(_) => 4,
            Self::Other(_) => 5,
        }
    }
}

/// A parsed program point name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PptName {
    full: String,
    function: String,
    tag: PointTag,
}

impl PptName {
    pub fn parse(name: &str) -> Self {
        match name.split_once(PPT_TAG_SEPARATOR) {
            Some((function, tag)) => Self {
                full: name.to_string(),
                function: function.to_string(),
                tag: PointTag::parse(tag),
            },
            None => Self {
                full: name.to_string(),
                function: name.to_string(),
                tag: PointTag::Other(String::new()),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Everything before the tag separator.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn tag(&self) -> &PointTag {
        &self.tag
    }

    pub fn is_enter(&self) -> bool {
        self.tag == PointTag::Enter
    }

    pub fn is_numbered_exit(&self) -> bool {
        matches!(self.tag, PointTag::NumberedExit(_))
    }

    pub fn is_object(&self) -> bool {
        self.tag == PointTag::Object
    }

    /// Name of the entry point this point's function starts at.
    pub fn enter_name(&self) -> String {
        format!("{}{PPT_TAG_SEPARATOR}{ENTER_TAG}", self.function)
    }

    /// Name of the combined exit for this point's function.
    pub fn combined_exit_name(&self) -> String {
        format!("{}{PPT_TAG_SEPARATOR}{EXIT_TAG}", self.function)
    }

    /// Owning class: for `Stack.push(int)` this is `Stack`; class and object
    /// points name the class directly.
    pub fn class_name(&self) -> Option<&str> {
        match self.tag {
            PointTag::Class | PointTag::Object => Some(self.function.as_str()),
            _ => {
                let head = self
                    .function
                    .split_once('(')
                    .map_or(self.function.as_str(), |(head, _)| head);
                head.rsplit_once('.').map(|(class, _)| class)
            }
        }
    }

    /// The `OBJECT` point of the owning class.
    pub fn object_name(&self) -> Option<String> {
        self.class_name()
            .map(|class| format!("{class}{PPT_TAG_SEPARATOR}{OBJECT_TAG}"))
    }

    /// The `CLASS` point of the owning class.
    pub fn class_point_name(&self) -> Option<String> {
        self.class_name()
            .map(|class| format!("{class}{PPT_TAG_SEPARATOR}{CLASS_TAG}"))
    }
}

impl fmt::Display for PptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl Ord for PptName {
    /// Orders by function, then CLASS < OBJECT < ENTER < EXIT < EXITnn
    /// (by number) < anything else.
    fn cmp(&self, other: &Self) -> Ordering {
        self.function
            .cmp(&other.function)
            .then_with(|| self.tag.rank().cmp(&other.tag.rank()))
            .then_with(|| match (&self.tag, &other.tag) {
                (PointTag::NumberedExit(a), PointTag::NumberedExit(b)) => a.cmp(b),
                (PointTag::Other(a), PointTag::Other(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
            .then_with(|| self.full.cmp(&other.full))
    }
}

impl PartialOrd for PptName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
