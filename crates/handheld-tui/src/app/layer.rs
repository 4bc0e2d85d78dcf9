//! The modal layer stack.

use strum::Display;
use tracing::{debug, warn};

use super::confirm::Dialog;
use super::menu::{ContextMenu, PopupMenu};

/// Identity of a layer, in ascending dispatch priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LayerId {
    Navigation,
    ContextMenu,
    PopupMenu,
    Dialog,
}

/// A layer above navigation.
#[derive(Debug)]
pub enum Overlay {
    ContextMenu(ContextMenu),
    PopupMenu(PopupMenu),
    Dialog(Dialog),
}

impl Overlay {
    pub fn id(&self) -> LayerId {
        match self {
            Self::ContextMenu(_) => LayerId::ContextMenu,
            Self::PopupMenu(_) => LayerId::PopupMenu,
            Self::Dialog(_) => LayerId::Dialog,
        }
    }
}

/// How the layer that handled an edge wants the stack to change.
#[derive(Debug)]
pub enum Transition {
    Stay,
    /// Open an overlay above the handling layer.
    Push(Overlay),
    /// Close the handling layer.
    Close,
    /// Close the handling layer and open another in its place.
    Replace(Overlay),
}

/// Navigation at the bottom plus one slot per overlay kind.
///
/// Edges go to the highest-priority open layer:
/// Dialog > PopupMenu > ContextMenu > Navigation.
#[derive(Debug, Default)]
pub struct ModalStack {
    context: Option<ContextMenu>,
    popup: Option<PopupMenu>,
    dialog: Option<Dialog>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The layer that receives the next edge.
    pub fn active(&self) -> LayerId {
        if self.dialog.is_some() {
            LayerId::Dialog
        } else if self.popup.is_some() {
            LayerId::PopupMenu
        } else if self.context.is_some() {
            LayerId::ContextMenu
        } else {
            LayerId::Navigation
        }
    }

    pub fn is_open(&self, layer: LayerId) -> bool {
        match layer {
            LayerId::Navigation => true,
            LayerId::ContextMenu => self.context.is_some(),
            LayerId::PopupMenu => self.popup.is_some(),
            LayerId::Dialog => self.dialog.is_some(),
        }
    }

    pub fn has_overlay(&self) -> bool {
        self.active() != LayerId::Navigation
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context.as_ref()
    }

    pub fn context_menu_mut(&mut self) -> Option<&mut ContextMenu> {
        self.context.as_mut()
    }

    pub fn popup_menu(&self) -> Option<&PopupMenu> {
        self.popup.as_ref()
    }

    pub fn popup_menu_mut(&mut self) -> Option<&mut PopupMenu> {
        self.popup.as_mut()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dialog.as_mut()
    }

    /// Open an overlay. Fails, handing it back, if its slot is taken.
    pub fn push(&mut self, overlay: Overlay) -> Result<(), Overlay> {
        let id = overlay.id();
        if self.is_open(id) {
            return Err(overlay);
        }
        match overlay {
            Overlay::ContextMenu(menu) => self.context = Some(menu),
            Overlay::PopupMenu(menu) => self.popup = Some(menu),
            Overlay::Dialog(dialog) => self.dialog = Some(dialog),
        }
        debug!(layer = %id, "Layer pushed");
        Ok(())
    }

    /// Close an overlay. Navigation cannot be closed.
    pub fn pop(&mut self, layer: LayerId) -> bool {
        let closed = match layer {
            LayerId::Navigation => false,
            LayerId::ContextMenu => self.context.take().is_some(),
            LayerId::PopupMenu => self.popup.take().is_some(),
            LayerId::Dialog => self.dialog.take().is_some(),
        };
        if closed {
            debug!(%layer, "Layer popped");
        }
        closed
    }

    /// Apply the transition requested by `from`. Returns whether any layer
    /// opened or closed.
    pub fn apply(&mut self, from: LayerId, transition: Transition) -> bool {
        match transition {
            Transition::Stay => false,
            Transition::Close => self.pop(from),
            Transition::Push(overlay) => self.open(overlay),
            Transition::Replace(overlay) => {
                let closed = self.pop(from);
                self.open(overlay) || closed
            }
        }
    }

    fn open(&mut self, overlay: Overlay) -> bool {
        match self.push(overlay) {
            Ok(()) => true,
            Err(rejected) => {
                warn!(layer = %rejected.id(), "Overlay already open, request dropped");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use handheld_core::PanelId;

    use super::*;

    #[test]
    fn test_priority_order() {
        let mut stack = ModalStack::new();
        assert_eq!(stack.active(), LayerId::Navigation);

        stack.push(Overlay::ContextMenu(ContextMenu::new())).unwrap();
        assert_eq!(stack.active(), LayerId::ContextMenu);

        stack.push(Overlay::PopupMenu(PopupMenu::new(PanelId::Left, 0, "/docs/notes.txt"))).unwrap();
        assert_eq!(stack.active(), LayerId::PopupMenu);

        stack.push(Overlay::Dialog(Dialog::info("hi"))).unwrap();
        assert_eq!(stack.active(), LayerId::Dialog);

        assert!(stack.pop(LayerId::Dialog));
        assert_eq!(stack.active(), LayerId::PopupMenu);
    }

    #[test]
    fn test_second_dialog_is_rejected() {
        let mut stack = ModalStack::new();
        stack.push(Overlay::Dialog(Dialog::info("first"))).unwrap();
        assert!(stack.push(Overlay::Dialog(Dialog::info("second"))).is_err());
        assert_eq!(stack.dialog().map(Dialog::message), Some("first"));
    }

    #[test]
    fn test_replace_popup_with_dialog() {
        let mut stack = ModalStack::new();
        stack.push(Overlay::PopupMenu(PopupMenu::new(PanelId::Left, 2, "/docs/photos"))).unwrap();

        assert!(stack.apply(LayerId::PopupMenu, Transition::Replace(Overlay::Dialog(Dialog::info("x")))));
        assert!(!stack.is_open(LayerId::PopupMenu));
        assert_eq!(stack.active(), LayerId::Dialog);

        assert!(stack.apply(LayerId::Dialog, Transition::Close));
        assert_eq!(stack.active(), LayerId::Navigation);
        assert!(!stack.apply(LayerId::Navigation, Transition::Close));
    }
}
