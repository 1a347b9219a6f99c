use crate::{
    foundation::error::{SymbolFxError, SymbolFxResult},
    foundation::math::parse_number,
    svg::style_attr,
};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Index of a node inside one [`SvgDocument`] arena.
///
/// Node ids are only meaningful for the document that produced them; a rebuilt document (see
/// [`crate::Engine::re_render`]) allocates fresh ids. Use [`SvgDocument::origin`] to match nodes
/// across rebuilds of the same source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

#[derive(Clone, Debug)]
enum NodeData {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Pre-order element index in the source markup; `None` for nodes created after parsing.
    origin: Option<u32>,
}

/// Detached copy of an element subtree, used to move nodes between documents.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Qualified tag name.
    pub name: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child content.
    pub children: Vec<FragmentChild>,
}

/// Child of a [`Fragment`].
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentChild {
    /// Nested element.
    Element(Fragment),
    /// Character data.
    Text(String),
}

/// Mutable SVG element tree.
///
/// This is the in-memory stand-in for a mounted vector element: the style applicator and the
/// animation runtime edit attributes and inline styles here, and hosts read the result back with
/// [`SvgDocument::to_svg_string`]. Comments and processing instructions are dropped on parse.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SvgDocument {
    /// Parse SVG markup. The document element must be `<svg>`.
    pub fn parse(text: &str) -> SymbolFxResult<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| SymbolFxError::parse(format!("invalid svg markup: {e}")))?;
        let root_el = xml.root_element();
        if root_el.tag_name().name() != "svg" {
            return Err(SymbolFxError::parse(format!(
                "document element must be <svg>, found <{}>",
                root_el.tag_name().name()
            )));
        }

        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        let mut origin = 0u32;
        doc.root = doc.import_xml(root_el, None, &mut origin);
        Ok(doc)
    }

    /// Document holding a bare `<svg>` root.
    pub fn empty() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.push(
            NodeData::Element {
                name: "svg".to_owned(),
                attrs: vec![("xmlns".to_owned(), "http://www.w3.org/2000/svg".to_owned())],
            },
            None,
        );
        doc
    }

    fn import_xml(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        parent: Option<roxmltree::Node<'_, '_>>,
        origin: &mut u32,
    ) -> NodeId {
        let mut attrs = Vec::new();
        for ns in node.namespaces() {
            if ns.uri() == XML_NS {
                continue;
            }
            let inherited = parent.is_some_and(|p| {
                p.namespaces()
                    .any(|pn| pn.name() == ns.name() && pn.uri() == ns.uri())
            });
            if inherited {
                continue;
            }
            let key = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_owned(),
            };
            attrs.push((key, ns.uri().to_owned()));
        }
        for a in node.attributes() {
            let key = match a.namespace().and_then(|uri| prefix_for(node, uri)) {
                Some(prefix) => format!("{prefix}:{}", a.name()),
                None => a.name().to_owned(),
            };
            attrs.push((key, a.value().to_owned()));
        }

        let tag = node.tag_name();
        let name = match tag.namespace().and_then(|uri| prefix_for(node, uri)) {
            Some(prefix) => format!("{prefix}:{}", tag.name()),
            None => tag.name().to_owned(),
        };

        let id = self.push(NodeData::Element { name, attrs }, Some(*origin));
        *origin += 1;

        for child in node.children() {
            if child.is_element() {
                let c = self.import_xml(child, Some(node), origin);
                self.attach(id, c);
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    let c = self.push(NodeData::Text(text.to_owned()), None);
                    self.attach(id, c);
                }
            }
        }
        id
    }

    fn push(&mut self, data: NodeData, origin: Option<u32>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
            origin,
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// The `<svg>` document element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Return `true` if `id` is an element (not character data).
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Element { .. })
    }

    /// Qualified tag name (`path`, `sodipodi:namedview`).
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { name, .. } => Some(name),
            NodeData::Text(_) => None,
        }
    }

    /// Tag name without namespace prefix.
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.name(id)
            .map(|n| n.rsplit_once(':').map(|(_, local)| local).unwrap_or(n))
    }

    /// Pre-order position of this element in the markup it was parsed from.
    pub fn origin(&self, id: NodeId) -> Option<u32> {
        self.node(id).origin
    }

    /// Parent node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// All child nodes, including character data.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Element children only.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// Pre-order element traversal starting at (and including) `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if !self.is_element(cur) {
                continue;
            }
            out.push(cur);
            for &c in self.node(cur).children.iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    /// Pre-order traversal of every element attached under the root.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root)
    }

    /// Return `true` when `ancestor` is `id` or one of its ancestors.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    /// Attribute value by qualified name.
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Numeric attribute value (accepts a `px` suffix).
    pub fn number_attr(&self, id: NodeId, key: &str) -> Option<f64> {
        self.attr(id, key).and_then(parse_number)
    }

    /// All attributes in document order.
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs,
            NodeData::Text(_) => &[],
        }
    }

    /// Set (or replace in place) an attribute.
    pub fn set_attr(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            match attrs.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value,
                None => attrs.push((key.to_owned(), value)),
            }
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, key: &str) -> Option<String> {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            let idx = attrs.iter().position(|(k, _)| k == key)?;
            return Some(attrs.remove(idx).1);
        }
        None
    }

    /// Keep only attributes for which `keep(name, value)` is `true`.
    pub fn retain_attrs(&mut self, id: NodeId, mut keep: impl FnMut(&str, &str) -> bool) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            attrs.retain(|(k, v)| keep(k, v));
        }
    }

    /// Value of an inline style property.
    pub fn style(&self, id: NodeId, prop: &str) -> Option<String> {
        let style = self.attr(id, "style")?;
        style_attr::parse_declarations(style)
            .into_iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v)
    }

    /// Set an inline style property, keeping other declarations.
    pub fn set_style(&mut self, id: NodeId, prop: &str, value: impl Into<String>) {
        let value = value.into();
        let mut decls = self
            .attr(id, "style")
            .map(style_attr::parse_declarations)
            .unwrap_or_default();
        match decls.iter_mut().find(|(p, _)| p == prop) {
            Some((_, v)) => *v = value,
            None => decls.push((prop.to_owned(), value)),
        }
        self.set_attr(id, "style", style_attr::serialize_declarations(&decls));
    }

    /// Remove inline style properties matching `pred`; drops an emptied `style` attribute.
    pub fn remove_style_where(&mut self, id: NodeId, mut pred: impl FnMut(&str, &str) -> bool) {
        let Some(style) = self.attr(id, "style") else {
            return;
        };
        let mut decls = style_attr::parse_declarations(style);
        let before = decls.len();
        decls.retain(|(p, v)| !pred(p, v));
        if decls.len() == before {
            return;
        }
        if decls.is_empty() {
            self.remove_attr(id, "style");
        } else {
            self.set_attr(id, "style", style_attr::serialize_declarations(&decls));
        }
    }

    /// Remove a single inline style property.
    pub fn remove_style(&mut self, id: NodeId, prop: &str) {
        self.remove_style_where(id, |p, _| p == prop);
    }

    /// Effective paint value on the element itself: inline style wins over the attribute.
    ///
    /// Inherited paint is not resolved.
    pub fn paint(&self, id: NodeId, prop: &str) -> Option<String> {
        self.style(id, prop)
            .map(|v| style_attr::split_important(&v).0.to_owned())
            .or_else(|| self.attr(id, prop).map(|v| v.trim().to_owned()))
    }

    /// Concatenated character data of direct children.
    pub fn text(&self, id: NodeId) -> String {
        self.node(id)
            .children
            .iter()
            .filter_map(|&c| match &self.node(c).data {
                NodeData::Text(t) => Some(t.as_str()),
                NodeData::Element { .. } => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for c in children {
            self.node_mut(c).parent = None;
        }
        let t = self.push(NodeData::Text(text.into()), None);
        self.attach(id, t);
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(
            NodeData::Element {
                name: name.to_owned(),
                attrs: Vec::new(),
            },
            None,
        )
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.attach(parent, child);
    }

    /// Insert `child` as the first child of `parent`, detaching it first.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.insert(0, child);
    }

    /// Detach a node from its parent. The subtree stays in the arena but is no longer reachable.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).parent.take() else {
            return;
        };
        self.node_mut(parent).children.retain(|&c| c != id);
    }

    /// First attached element whose `id` attribute equals `value`.
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(value))
    }

    /// Attached element parsed from source position `origin`.
    pub fn find_by_origin(&self, origin: u32) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&n| self.origin(n) == Some(origin))
    }

    /// Locate a declared sub-element ("part") such as `track`, `fill`, or `label`.
    ///
    /// A `data-part="<role>"` attribute wins; otherwise an element whose id is `<role>` or ends
    /// in `-<role>` / `_<role>` is accepted.
    pub fn find_part(&self, role: &str) -> Option<NodeId> {
        let elements = self.elements();
        if let Some(&n) = elements
            .iter()
            .find(|&&n| self.attr(n, "data-part") == Some(role))
        {
            return Some(n);
        }
        let dash = format!("-{role}");
        let under = format!("_{role}");
        elements.into_iter().find(|&n| {
            self.attr(n, "id").is_some_and(|id| {
                let id = id.to_ascii_lowercase();
                id == role || id.ends_with(&dash) || id.ends_with(&under)
            })
        })
    }

    /// Copy an element subtree out of the arena.
    pub fn extract(&self, id: NodeId) -> Fragment {
        Fragment {
            name: self.name(id).unwrap_or_default().to_owned(),
            attrs: self.attrs(id).to_vec(),
            children: self
                .children(id)
                .iter()
                .map(|&c| match &self.node(c).data {
                    NodeData::Text(t) => FragmentChild::Text(t.clone()),
                    NodeData::Element { .. } => FragmentChild::Element(self.extract(c)),
                })
                .collect(),
        }
    }

    /// Materialize a fragment as the last child of `parent`.
    pub fn insert_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> NodeId {
        let id = self.push(
            NodeData::Element {
                name: fragment.name.clone(),
                attrs: fragment.attrs.clone(),
            },
            None,
        );
        self.attach(parent, id);
        for child in &fragment.children {
            match child {
                FragmentChild::Element(f) => {
                    self.insert_fragment(id, f);
                }
                FragmentChild::Text(t) => {
                    let t = self.push(NodeData::Text(t.clone()), None);
                    self.attach(id, t);
                }
            }
        }
        id
    }

    /// Serialize the attached tree back to SVG markup.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            NodeData::Text(t) => escape_into(t, false, out),
            NodeData::Element { name, attrs } => {
                out.push('<');
                out.push_str(name);
                for (k, v) in attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    escape_into(v, true, out);
                    out.push('"');
                }
                let children = &self.node(id).children;
                if children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &c in children {
                    self.write_node(c, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn prefix_for(node: roxmltree::Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == XML_NS {
        return Some("xml".to_owned());
    }
    node.lookup_prefix(uri).map(str::to_owned)
}

fn escape_into(s: &str, attr: bool, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/document.rs"]
mod tests;
