//! The element tree of an OFX document and path-based navigation through it.

use crate::error::{Error, Result};

/// A markup element: either a leaf holding text, or an aggregate holding other elements.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Element {
    pub name: String,
    /// The trimmed value of a leaf; `None` for aggregates.
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn leaf(name: &str, text: &str) -> Self {
        Element {
            name: String::from(name),
            text: Some(String::from(text)),
            children: Vec::new(),
        }
    }

    pub fn aggregate(name: &str, children: Vec<Element>) -> Self {
        Element {
            name: String::from(name),
            text: None,
            children,
        }
    }

    /// The first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub(crate) fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

/// A position in an element tree, remembering the path taken to reach it so that a failed lookup
/// can report exactly which segment was missing.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    element: &'a Element,
    path: Vec<&'a str>,
}

impl<'a> Cursor<'a> {
    pub fn new(root: &'a Element) -> Self {
        Cursor {
            element: root,
            path: vec![root.name.as_str()],
        }
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// The `/`-separated names from the root to this element.
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    /// Descends through the first child matching each of `names` in turn.
    pub fn descend(&self, names: &[&'a str]) -> Result<Cursor<'a>> {
        let mut cursor = self.clone();
        for &name in names {
            cursor.path.push(name);
            cursor.element = cursor
                .element
                .child(name)
                .ok_or_else(|| Error::NodeNotFound(cursor.path()))?;
        }
        Ok(cursor)
    }

    /// The value of the element at `names`. Reaching an aggregate instead of a leaf is an error.
    pub fn text(&self, names: &[&'a str]) -> Result<&'a str> {
        let cursor = self.descend(names)?;
        let element: &'a Element = cursor.element;
        element.text.as_deref().ok_or_else(|| {
            Error::MarkupMalformed(format!(
                "expected a value at {}, found elements",
                cursor.path()
            ))
        })
    }

    /// The value of the element at `names`, if it exists and is not empty.
    pub fn opt_text(&self, names: &[&'a str]) -> Option<&'a str> {
        self.text(names).ok().filter(|v| !v.is_empty())
    }

    /// All children named `name`, in document order.
    pub fn children(&self, name: &'a str) -> Vec<Cursor<'a>> {
        self.element
            .children_named(name)
            .map(|element| {
                let mut path = self.path.clone();
                path.push(name);
                Cursor { element, path }
            })
            .collect()
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn tree() -> Element {
        Element::aggregate(
            "OFX",
            vec![Element::aggregate(
                "LIST",
                vec![
                    Element::aggregate("ITEM", vec![Element::leaf("ID", "A")]),
                    Element::leaf("NOTE", ""),
                    Element::aggregate("ITEM", vec![Element::leaf("ID", "B")]),
                    Element::aggregate("ITEM", vec![Element::leaf("ID", "C")]),
                ],
            )],
        )
    }

    #[test_case(&["LIST", "ITEM", "ID"], Ok("A")                                          ; "first match wins")]
    #[test_case(&["LIST", "NOTE"]      , Ok("")                                           ; "empty leaf"      )]
    #[test_case(&["LIST"]              , Err(Error::MarkupMalformed(String::from("expected a value at OFX/LIST, found elements"))) ; "aggregate")]
    #[test_case(&["LIST", "MISSING"]   , Err(Error::NodeNotFound(String::from("OFX/LIST/MISSING"))) ; "missing leaf")]
    #[test_case(&["NOPE", "ITEM"]      , Err(Error::NodeNotFound(String::from("OFX/NOPE")))         ; "missing aggregate")]
    #[test_case(&["list"]              , Err(Error::NodeNotFound(String::from("OFX/list")))         ; "case sensitive")]
    fn cursor__text(path: &[&str], expected: Result<&str>) {
        let tree = tree();

        assert_eq!(Cursor::new(&tree).text(path), expected);
    }

    #[test]
    fn cursor__descend__path_accumulates() {
        let tree = tree();
        let list = Cursor::new(&tree).descend(&["LIST"]).unwrap();

        assert_eq!(list.path(), "OFX/LIST");
        assert_eq!(
            list.descend(&["ITEM", "NOPE"]).unwrap_err(),
            Error::NodeNotFound(String::from("OFX/LIST/ITEM/NOPE"))
        );
    }

    #[test]
    fn cursor__opt_text__missing_or_empty_is_none() {
        let tree = tree();
        let list = Cursor::new(&tree).descend(&["LIST"]).unwrap();

        assert_eq!(list.opt_text(&["NOTE"]), None);
        assert_eq!(list.opt_text(&["MISSING"]), None);
        assert_eq!(list.opt_text(&["ITEM", "ID"]), Some("A"));
        assert_eq!(list.opt_text(&["ITEM"]), None);
    }

    #[test]
    fn cursor__children__document_order() {
        let tree = tree();
        let list = Cursor::new(&tree).descend(&["LIST"]).unwrap();

        let ids = list
            .children("ITEM")
            .iter()
            .map(|c| c.text(&["ID"]))
            .collect::<Result<Vec<_>>>();

        assert_eq!(ids, Ok(vec!["A", "B", "C"]));
        assert!(list.children("NOPE").is_empty());
    }

    #[test]
    fn element__descendant_count() {
        assert_eq!(tree().descendant_count(), 8);
    }
}
