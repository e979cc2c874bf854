//! Page composition.

use xolo_smoke::{
    EffectState, FrameReport, FrameRequest, Host, HostEvent, SmokeConfig, SmokeEffect, Viewport,
};
use xolo_ui::{CursorFollower, InputEvent, InputState, Product, ShellState};

/// The storefront page bound to a host.
pub struct Storefront<H: Host> {
    host: H,
    shell: ShellState,
    cursor: CursorFollower,
    input: InputState,
    smoke: SmokeEffect<H::Canvas>,
    /// Host time of the previous page refresh, for shell transitions.
    last_refresh: Option<f64>,
}

impl<H: Host> Storefront<H> {
    /// Builds the page and enables the smoke overlay.
    pub fn new(mut host: H, config: SmokeConfig) -> Self {
        let mut smoke = SmokeEffect::new(config);
        smoke.set_enabled(&mut host, true);

        Self {
            host,
            shell: ShellState::new(),
            cursor: CursorFollower::new(),
            input: InputState::new(),
            smoke,
            last_refresh: None,
        }
    }

    /// Turns the smoke overlay on or off.
    pub fn set_smoke_enabled(&mut self, enabled: bool) {
        self.smoke.set_enabled(&mut self.host, enabled);
    }

    /// Delivers one page input event. Returns the particles it spawned.
    pub fn handle_input(&mut self, event: &InputEvent) -> usize {
        self.input.apply(event);

        let smoke_event = match *event {
            InputEvent::PointerMove { x, y, time } => {
                self.cursor.on_move(x, y);
                HostEvent::PointerMove { x, y, time }
            }
            InputEvent::Scroll { time, .. } => HostEvent::Scroll { time },
            InputEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            } => HostEvent::Resize(Viewport::new(width, height, device_pixel_ratio)),
        };

        self.smoke.handle_event(&mut self.host, &smoke_event)
    }

    /// One display refresh of the page: steps the cart and checkout
    /// transitions and starts a new input frame.
    ///
    /// Call on every refresh. It does not depend on the smoke overlay,
    /// which schedules its own frames.
    pub fn advance(&mut self) {
        let now = self.host.now();
        let dt_ms = self.last_refresh.map_or(0.0, |last| (now - last).max(0.0));
        self.last_refresh = Some(now);

        self.shell.update((dt_ms / 1000.0) as f32);
        self.input.begin_frame();
    }

    /// Runs the smoke overlay's frame callback `request`.
    ///
    /// Returns `None` when the overlay is off or the request is stale.
    pub fn on_frame(&mut self, request: FrameRequest) -> Option<FrameReport> {
        self.smoke.on_frame(&mut self.host, request)
    }

    /// "+" on a product card.
    pub fn add_to_cart(&mut self, product: Product) {
        self.shell.add_to_cart(product);
    }

    /// Tears the overlay down. The page itself stays usable.
    pub fn teardown(&mut self) {
        self.smoke.teardown(&mut self.host);
    }

    /// Smoke overlay lifecycle state.
    #[must_use]
    pub fn smoke_state(&self) -> EffectState {
        self.smoke.state()
    }

    /// The smoke overlay.
    #[must_use]
    pub fn smoke(&self) -> &SmokeEffect<H::Canvas> {
        &self.smoke
    }

    /// Cart and overlay visibility.
    #[must_use]
    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    /// Mutable shell, for cart and checkout buttons.
    pub fn shell_mut(&mut self) -> &mut ShellState {
        &mut self.shell
    }

    /// The custom cursor.
    #[must_use]
    pub fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }

    /// This frame's accumulated input.
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably (clock and frame queue for headless runs).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
