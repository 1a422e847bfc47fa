use crate::model::{Element, ElementKind};

/// Moves every run of comments onto the next non-comment element at the same
/// nesting level, then does the same inside each container with a fresh run.
///
/// Comments that are not followed by an element at their level are dropped.
pub fn attach_comments(elements: &mut [Element]) {
    let mut buffer: Vec<String> = Vec::new();
    for el in elements.iter_mut() {
        if let Element::Comment(c) = el {
            buffer.push(c.text.clone());
            continue;
        }
        if let Some(comments) = el.comments_mut() {
            *comments = std::mem::take(&mut buffer);
        }
        if let Some(children) = el.children_mut() {
            attach_comments(children);
        }
    }
}

/// Depth-first, pre-order lookup of a message, enum or service by simple
/// name. Only message bodies are searched below the top level.
pub fn find_type<'a>(elements: &'a [Element], name: &str, kind: ElementKind) -> Option<&'a Element> {
    for el in elements {
        if el.name() == Some(name) && el.kind() == Some(kind) {
            return Some(el);
        }
        if let Element::Message(m) = el
            && let Some(found) = find_type(&m.elements, name, kind)
        {
            return Some(found);
        }
    }
    None
}
