//! Interaction model of a generated map page.
//!
//! The page script in `assets/viewer.js` drives the browser. This module is
//! its typed counterpart. [`ViewController`] performs the same style writes
//! against any [`StyleSurface`], and [`Page`] reproduces click dispatch from
//! a folder up through its enclosing folders. The renderer uses both to bake
//! an initial view (overlays shown, a folder focused) into the document.

/// Root custom property holding the file-name overlay flag.
pub const FILE_TEXT_OPACITY: &str = "--file-text-opacity";
/// Root custom property holding the reference-line overlay flag.
pub const REFERENCE_OPACITY: &str = "--reference-opacity";
/// Root custom property scaling all text.
pub const TEXT_SCALING: &str = "--text-scaling";
/// Id of the element that pan/zoom transforms apply to.
pub const VIEW_ROOT_ID: &str = "view-root";
/// Class marking zoomable folder elements.
pub const FOLDER_CLASS: &str = "folder";
/// Transform written by a view reset.
pub const NO_TRANSFORM: &str = "none";

/// Overlay layers that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    FileText,
    References,
}

impl Overlay {
    pub fn property(self) -> &'static str {
        match self {
            Overlay::FileText => FILE_TEXT_OPACITY,
            Overlay::References => REFERENCE_OPACITY,
        }
    }
}

/// The style properties the controller reads and writes.
pub trait StyleSurface {
    fn overlay_visible(&self, overlay: Overlay) -> bool;
    fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool);
    fn transform(&self) -> Option<&str>;
    fn set_transform(&mut self, transform: Option<&str>);
    fn text_scale(&self) -> Option<f64>;
    fn set_text_scale(&mut self, scale: Option<f64>);
}

/// In-memory view state, also used as the document's initial style.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub file_text: bool,
    pub references: bool,
    /// `None` until something writes a transform
    pub transform: Option<String>,
    pub text_scale: Option<f64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            file_text: false,
            references: false,
            transform: None,
            text_scale: Some(1.0),
        }
    }
}

impl ViewState {
    /// Inline style for the document root. Absent values are left out so
    /// the stylesheet default applies.
    pub fn root_style(&self) -> String {
        let mut style = format!(
            "{FILE_TEXT_OPACITY}: {}; {REFERENCE_OPACITY}: {}",
            u8::from(self.file_text),
            u8::from(self.references)
        );
        if let Some(scale) = self.text_scale {
            style.push_str(&format!("; {TEXT_SCALING}: {scale}"));
        }
        style
    }

    /// Inline style for the view root, if a transform was written.
    pub fn view_root_style(&self) -> Option<String> {
        self.transform
            .as_ref()
            .map(|transform| format!("transform: {transform}"))
    }
}

impl StyleSurface for ViewState {
    fn overlay_visible(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::FileText => self.file_text,
            Overlay::References => self.references,
        }
    }

    fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool) {
        match overlay {
            Overlay::FileText => self.file_text = visible,
            Overlay::References => self.references = visible,
        }
    }

    fn transform(&self) -> Option<&str> {
        self.transform.as_deref()
    }

    fn set_transform(&mut self, transform: Option<&str>) {
        self.transform = transform.map(str::to_string);
    }

    fn text_scale(&self) -> Option<f64> {
        self.text_scale
    }

    fn set_text_scale(&mut self, scale: Option<f64>) {
        self.text_scale = scale;
    }
}

/// Zoom target declared on a folder element (`data-transform`,
/// `data-text-scale`). Values are passed through unchecked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderAttributes {
    pub transform: Option<String>,
    pub text_scale: Option<f64>,
}

/// Whether an event keeps bubbling to ancestor elements after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Applies overlay toggles, resets and folder zooms to a style surface.
#[derive(Debug, Clone, Default)]
pub struct ViewController<S> {
    surface: S,
}

impl<S: StyleSurface> ViewController<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Wires a click handler onto every folder element currently on the
    /// page and returns how many were registered.
    ///
    /// Calling this twice registers every handler twice.
    pub fn load(&self, page: &mut Page) -> usize {
        let folders = page.elements_by_class(FOLDER_CLASS);
        for &id in &folders {
            page.add_click_listener(id, Listener::FolderZoom);
        }
        log::debug!("Registered {} folder click handlers", folders.len());
        folders.len()
    }

    pub fn toggle_file_text(&mut self) {
        self.toggle(Overlay::FileText);
    }

    pub fn toggle_references(&mut self) {
        self.toggle(Overlay::References);
    }

    fn toggle(&mut self, overlay: Overlay) {
        let visible = self.surface.overlay_visible(overlay);
        self.surface.set_overlay_visible(overlay, !visible);
    }

    /// Drops any zoom: no transform on the view root, text at scale 1.
    pub fn reset_view(&mut self) {
        self.surface.set_transform(Some(NO_TRANSFORM));
        self.surface.set_text_scale(Some(1.0));
    }

    /// Zooms to a folder by copying its declared attributes verbatim.
    /// Enclosing folders must not handle the same click.
    pub fn on_folder_click(&mut self, folder: &FolderAttributes) -> Propagation {
        self.surface.set_transform(folder.transform.as_deref());
        self.surface.set_text_scale(folder.text_scale);
        Propagation::Stop
    }
}

pub type ElementId = usize;

/// Event handlers the page can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    FolderZoom,
}

#[derive(Debug, Clone)]
pub struct PageElement {
    pub parent: Option<ElementId>,
    pub classes: Vec<String>,
    /// Path of the element's item below the map root, used for lookups.
    /// Elements that stand for no item have none.
    pub label: Option<String>,
    pub attributes: FolderAttributes,
    listeners: Vec<Listener>,
}

/// Element tree of a rendered map, enough to dispatch clicks.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<PageElement>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element; parents must be pushed before their children.
    pub fn push(
        &mut self,
        parent: Option<ElementId>,
        classes: &[&str],
        label: Option<&str>,
        attributes: FolderAttributes,
    ) -> ElementId {
        self.elements.push(PageElement {
            parent,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            label: label.map(str::to_string),
            attributes,
            listeners: Vec::new(),
        });
        self.elements.len() - 1
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&PageElement> {
        self.elements.get(id)
    }

    /// Elements carrying `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.classes.iter().any(|c| c == class))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn find_by_label(&self, label: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|element| element.label.as_deref() == Some(label))
    }

    pub fn add_click_listener(&mut self, id: ElementId, listener: Listener) {
        if let Some(element) = self.elements.get_mut(id) {
            element.listeners.push(listener);
        }
    }

    pub fn listener_count(&self, id: ElementId) -> usize {
        self.elements.get(id).map_or(0, |e| e.listeners.len())
    }

    /// Delivers a click to `target` and bubbles it through its ancestors.
    ///
    /// All listeners on one element run; bubbling ends after the first
    /// element where a listener stopped propagation. Returns the number of
    /// listeners invoked.
    pub fn dispatch_click<S: StyleSurface>(
        &self,
        target: ElementId,
        controller: &mut ViewController<S>,
    ) -> usize {
        let mut invoked = 0;
        let mut current = Some(target);
        while let Some(element) = current.and_then(|id| self.elements.get(id)) {
            let mut propagation = Propagation::Continue;
            for listener in &element.listeners {
                invoked += 1;
                let result = match listener {
                    Listener::FolderZoom => controller.on_folder_click(&element.attributes),
                };
                if result == Propagation::Stop {
                    propagation = Propagation::Stop;
                }
            }
            if propagation == Propagation::Stop {
                break;
            }
            current = element.parent;
        }
        invoked
    }
}
