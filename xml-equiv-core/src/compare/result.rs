use serde::Serialize;

use crate::XmlNode;

/// The first pair of corresponding nodes at which two trees diverge.
///
/// Either side may be absent: a node present in only one tree is paired with
/// `None` on the other side. Both references borrow the caller's trees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mismatch<'a> {
    pub left: Option<&'a XmlNode>,
    pub right: Option<&'a XmlNode>,
}

impl<'a> Mismatch<'a> {
    pub(crate) fn between(left: Option<&'a XmlNode>, right: Option<&'a XmlNode>) -> Self {
        Mismatch { left, right }
    }

    pub(crate) fn of(left: &'a XmlNode, right: &'a XmlNode) -> Self {
        Mismatch {
            left: Some(left),
            right: Some(right),
        }
    }

    pub(crate) fn only_left(left: &'a XmlNode) -> Self {
        Mismatch {
            left: Some(left),
            right: None,
        }
    }

    pub(crate) fn only_right(right: &'a XmlNode) -> Self {
        Mismatch {
            left: None,
            right: Some(right),
        }
    }
}
