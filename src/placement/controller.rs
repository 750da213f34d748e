use std::cell::Cell;

use tracing::debug;

use super::backend::{DockBackend, DockWindow};
use super::geometry::{self, Placement};

/// Visibility of the start menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Hidden,
    Shown,
}

/// What a toggle notification did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Shown,
    Hidden,
    /// Emitted while the controller was setting the toggle itself
    Suppressed,
}

/// Keys the menu reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// Keeps the panel, its shadow and the start menu in place and in sync.
///
/// All methods run on the UI thread. Toolkit calls made from here may emit
/// signals that re-enter the controller synchronously, so state lives in
/// `Cell`s and no borrow is held across a backend call.
pub struct PlacementController<B> {
    backend: B,
    shadow_offset: Cell<i32>,
    menu: Cell<MenuState>,
    toggle_suppressed: Cell<bool>,
}

impl<B: DockBackend> PlacementController<B> {
    pub fn new(backend: B, shadow_offset: i32) -> Self {
        Self {
            backend,
            shadow_offset: Cell::new(shadow_offset),
            menu: Cell::new(MenuState::Hidden),
            toggle_suppressed: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn menu_state(&self) -> MenuState {
        self.menu.get()
    }

    pub fn set_shadow_offset(&self, offset: i32) {
        self.shadow_offset.set(offset);
    }

    /// Dock the panel and shadow against the bottom edge and reserve the strut.
    pub fn on_realize(&self) -> Placement {
        let screen = self.backend.screen_size();
        let panel_height = self.backend.panel_height();
        let placement = geometry::dock_placement(screen, panel_height, self.shadow_offset.get());

        self.backend.move_window(DockWindow::Panel, placement.panel);
        self.backend.move_window(DockWindow::Shadow, placement.shadow);
        self.backend
            .reserve_bottom_strut(DockWindow::Panel, placement.strut);

        debug!(
            "Panel docked at {:?}, shadow at {:?}, strut {}px",
            placement.panel, placement.shadow, placement.strut
        );

        placement
    }

    /// Resize panel and shadow to the current screen width, then dock again.
    pub fn on_screen_changed(&self) -> Placement {
        let screen = self.backend.screen_size();
        let panel_height = self.backend.panel_height();

        self.backend
            .resize_window(DockWindow::Panel, screen.width, panel_height);
        self.backend
            .resize_window(DockWindow::Shadow, screen.width, self.shadow_offset.get());

        self.on_realize()
    }

    pub fn on_toggle_changed(&self, active: bool) -> ToggleOutcome {
        if self.toggle_suppressed.get() {
            return ToggleOutcome::Suppressed;
        }

        if !active {
            self.backend.set_visible(DockWindow::Menu, false);
            self.menu.set(MenuState::Hidden);
            debug!("Menu hidden by toggle");
            return ToggleOutcome::Hidden;
        }

        // Geometry is read now; the panel may have been resized since startup
        let screen = self.backend.screen_size();
        let origin = geometry::menu_origin(screen, self.backend.panel_height());

        self.backend.move_window(DockWindow::Menu, origin);
        self.backend.present(DockWindow::Menu);
        self.backend.set_visible(DockWindow::Menu, true);
        self.menu.set(MenuState::Shown);
        debug!("Menu shown at {:?}", origin);

        ToggleOutcome::Shown
    }

    pub fn on_menu_focus_lost(&self) {
        self.dismiss_menu();
    }

    pub fn on_menu_key_released(&self, key: MenuKey) -> KeyOutcome {
        match key {
            MenuKey::Escape => {
                self.dismiss_menu();
                KeyOutcome::Handled
            }
            MenuKey::Other => KeyOutcome::Ignored,
        }
    }

    /// Hide the menu and reset the toggle without running the toggle handler.
    pub fn dismiss_menu(&self) {
        {
            let _guard = SuppressToggle::new(&self.toggle_suppressed);
            self.backend.set_toggle_active(false);
        }

        self.backend.set_visible(DockWindow::Menu, false);
        self.menu.set(MenuState::Hidden);
        debug!("Menu dismissed");
    }
}

/// Sets the suppression flag for its lifetime
struct SuppressToggle<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> SuppressToggle<'a> {
    fn new(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for SuppressToggle<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::backend::{ScreenGeometry, StrutHints, WindowOps};
    use crate::placement::geometry::{Point, ScreenSize};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::{Rc, Weak};

    type Hook = Box<dyn Fn(bool) -> ToggleOutcome>;

    /// Records toolkit calls; toggle changes are re-emitted through `hook`
    /// the way a real toggle button emits its change signal.
    #[derive(Default)]
    struct FakeState {
        screen: Cell<(i32, i32)>,
        panel_height: Cell<i32>,
        positions: RefCell<HashMap<DockWindow, Point>>,
        sizes: RefCell<HashMap<DockWindow, (i32, i32)>>,
        visible: RefCell<HashMap<DockWindow, bool>>,
        presented: Cell<u32>,
        menu_hides: Cell<u32>,
        struts: RefCell<Vec<i32>>,
        toggle_active: Cell<bool>,
        reentries: RefCell<Vec<ToggleOutcome>>,
        hook: RefCell<Option<Hook>>,
    }

    #[derive(Clone, Default)]
    struct FakeBackend(Rc<FakeState>);

    impl ScreenGeometry for FakeBackend {
        fn screen_size(&self) -> ScreenSize {
            let (width, height) = self.0.screen.get();
            ScreenSize::new(width, height)
        }
    }

    impl WindowOps for FakeBackend {
        fn panel_height(&self) -> i32 {
            self.0.panel_height.get()
        }

        fn move_window(&self, window: DockWindow, origin: Point) {
            self.0.positions.borrow_mut().insert(window, origin);
        }

        fn resize_window(&self, window: DockWindow, width: i32, height: i32) {
            self.0.sizes.borrow_mut().insert(window, (width, height));
        }

        fn set_visible(&self, window: DockWindow, visible: bool) {
            if window == DockWindow::Menu && !visible {
                self.0.menu_hides.set(self.0.menu_hides.get() + 1);
            }
            self.0.visible.borrow_mut().insert(window, visible);
        }

        fn present(&self, _window: DockWindow) {
            self.0.presented.set(self.0.presented.get() + 1);
        }

        fn set_toggle_active(&self, active: bool) {
            if self.0.toggle_active.replace(active) == active {
                return;
            }
            if let Some(hook) = self.0.hook.borrow().as_ref() {
                let outcome = hook(active);
                self.0.reentries.borrow_mut().push(outcome);
            }
        }
    }

    impl StrutHints for FakeBackend {
        fn reserve_bottom_strut(&self, _window: DockWindow, pixels: i32) {
            self.0.struts.borrow_mut().push(pixels);
        }
    }

    impl FakeBackend {
        fn position(&self, window: DockWindow) -> Option<Point> {
            self.0.positions.borrow().get(&window).copied()
        }

        fn is_visible(&self, window: DockWindow) -> bool {
            self.0.visible.borrow().get(&window).copied().unwrap_or(false)
        }
    }

    fn setup(width: i32, height: i32, panel_height: i32) -> Rc<PlacementController<FakeBackend>> {
        let backend = FakeBackend::default();
        backend.0.screen.set((width, height));
        backend.0.panel_height.set(panel_height);

        let controller = Rc::new(PlacementController::new(backend.clone(), 4));
        let weak: Weak<PlacementController<FakeBackend>> = Rc::downgrade(&controller);
        *backend.0.hook.borrow_mut() = Some(Box::new(move |active| {
            weak.upgrade()
                .map(|c| c.on_toggle_changed(active))
                .unwrap_or(ToggleOutcome::Suppressed)
        }));

        controller
    }

    /// User clicks the toggle: the button flips, then emits its signal.
    fn click_toggle(controller: &PlacementController<FakeBackend>, active: bool) -> ToggleOutcome {
        controller.backend().0.toggle_active.set(active);
        controller.on_toggle_changed(active)
    }

    #[test]
    fn realize_docks_panel_and_shadow() {
        let controller = setup(1920, 1080, 25);
        let placement = controller.on_realize();
        let backend = controller.backend();

        assert_eq!(backend.position(DockWindow::Panel), Some(Point::new(0, 1055)));
        assert_eq!(backend.position(DockWindow::Shadow), Some(Point::new(0, 1051)));
        assert_eq!(*backend.0.struts.borrow(), vec![25]);
        assert_eq!(placement.panel, Point::new(0, 1055));
    }

    #[test]
    fn realize_is_idempotent() {
        let controller = setup(1366, 768, 30);
        let first = controller.on_realize();
        let second = controller.on_realize();

        assert_eq!(first, second);
        assert_eq!(
            controller.backend().position(DockWindow::Panel),
            Some(Point::new(0, 738))
        );
        assert_eq!(*controller.backend().0.struts.borrow(), vec![30, 30]);
    }

    #[test]
    fn toggle_on_shows_menu_above_bottom_edge() {
        let controller = setup(1920, 1080, 25);

        assert_eq!(click_toggle(&controller, true), ToggleOutcome::Shown);
        let backend = controller.backend();
        assert_eq!(backend.position(DockWindow::Menu), Some(Point::new(0, 1055)));
        assert!(backend.is_visible(DockWindow::Menu));
        assert_eq!(backend.0.presented.get(), 1);
        assert_eq!(controller.menu_state(), MenuState::Shown);
    }

    #[test]
    fn toggle_uses_current_panel_height() {
        let controller = setup(1920, 1080, 25);
        controller.on_realize();

        controller.backend().0.panel_height.set(40);
        click_toggle(&controller, true);

        assert_eq!(
            controller.backend().position(DockWindow::Menu),
            Some(Point::new(0, 1040))
        );
    }

    #[test]
    fn toggle_off_hides_menu() {
        let controller = setup(1920, 1080, 25);
        click_toggle(&controller, true);

        assert_eq!(click_toggle(&controller, false), ToggleOutcome::Hidden);
        let backend = controller.backend();
        assert_eq!(controller.menu_state(), MenuState::Hidden);
        assert!(!backend.is_visible(DockWindow::Menu));
        assert!(!backend.0.toggle_active.get());
        assert!(backend.0.reentries.borrow().is_empty());
    }

    #[test]
    fn focus_loss_resets_toggle_without_reentry() {
        let controller = setup(1920, 1080, 25);
        click_toggle(&controller, true);

        controller.on_menu_focus_lost();
        let backend = controller.backend();

        assert_eq!(controller.menu_state(), MenuState::Hidden);
        assert!(!backend.0.toggle_active.get());
        assert!(!backend.is_visible(DockWindow::Menu));
        assert_eq!(*backend.0.reentries.borrow(), vec![ToggleOutcome::Suppressed]);
        assert_eq!(backend.0.menu_hides.get(), 1);
    }

    #[test]
    fn escape_behaves_like_focus_loss() {
        let controller = setup(1920, 1080, 25);
        click_toggle(&controller, true);

        assert_eq!(
            controller.on_menu_key_released(MenuKey::Escape),
            KeyOutcome::Handled
        );
        let backend = controller.backend();
        assert_eq!(controller.menu_state(), MenuState::Hidden);
        assert!(!backend.0.toggle_active.get());
        assert_eq!(*backend.0.reentries.borrow(), vec![ToggleOutcome::Suppressed]);
        assert_eq!(backend.0.menu_hides.get(), 1);
    }

    #[test]
    fn other_keys_pass_through() {
        let controller = setup(1920, 1080, 25);
        click_toggle(&controller, true);

        assert_eq!(
            controller.on_menu_key_released(MenuKey::Other),
            KeyOutcome::Ignored
        );
        assert_eq!(controller.menu_state(), MenuState::Shown);
        assert!(controller.backend().0.toggle_active.get());
        assert!(controller.backend().is_visible(DockWindow::Menu));
    }

    #[test]
    fn toggle_handler_works_after_dismissal() {
        let controller = setup(1920, 1080, 25);
        click_toggle(&controller, true);
        controller.dismiss_menu();

        assert_eq!(click_toggle(&controller, true), ToggleOutcome::Shown);
        assert_eq!(controller.menu_state(), MenuState::Shown);
    }

    #[test]
    fn dismissing_hidden_menu_stays_hidden() {
        let controller = setup(1920, 1080, 25);
        controller.dismiss_menu();

        assert_eq!(controller.menu_state(), MenuState::Hidden);
        assert!(controller.backend().0.reentries.borrow().is_empty());
    }

    #[test]
    fn screen_change_resizes_and_redocks() {
        let controller = setup(1920, 1080, 25);
        controller.on_realize();

        controller.backend().0.screen.set((2560, 1440));
        controller.set_shadow_offset(6);
        let placement = controller.on_screen_changed();
        let backend = controller.backend();

        assert_eq!(backend.0.sizes.borrow().get(&DockWindow::Panel), Some(&(2560, 25)));
        assert_eq!(backend.0.sizes.borrow().get(&DockWindow::Shadow), Some(&(2560, 6)));
        assert_eq!(placement.panel, Point::new(0, 1415));
        assert_eq!(placement.shadow, Point::new(0, 1409));
        assert_eq!(*backend.0.struts.borrow(), vec![25, 25]);
    }
}
