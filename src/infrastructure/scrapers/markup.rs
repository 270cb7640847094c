use crate::error::{PullError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Minimal element tree: enough structure for addressing fields by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    /// Text before the first child element.
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Default::default()
        }
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    /// Follows a path of child indices from this element.
    pub fn at(&self, path: &[usize]) -> Option<&Element> {
        path.iter().try_fold(self, |element, &index| element.child(index))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn push_text(&mut self, text: &str) {
        if self.children.is_empty() {
            self.text.get_or_insert_with(String::new).push_str(text);
        }
    }
}

/// Parses one sanitized fragment with end-name checking enabled.
pub fn parse_element(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            PullError::Markup(format!("{e} at byte {}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(PullError::Markup("multiple root elements".to_string()));
                }
                stack.push(Element::new(start.name().as_ref()));
            }
            Event::Empty(empty) => {
                let element = Element::new(empty.name().as_ref());
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| PullError::Markup("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| PullError::Markup(e.to_string()))?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text);
                }
            }
            Event::CData(data) => {
                let data = String::from_utf8_lossy(&data).into_owned();
                if let Some(current) = stack.last_mut() {
                    current.push_text(&data);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PullError::Markup(format!("unclosed <{}>", open.name)));
    }
    root.ok_or_else(|| PullError::Markup("no root element".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(PullError::Markup("multiple root elements".to_string())),
    }
    Ok(())
}
