//! Game controller backend on top of SDL2.

use handheld_core::{Button, ButtonSample, ButtonSet};
use sdl2::GameControllerSubsystem;
use sdl2::controller::{Button as SdlButton, GameController};
use tracing::{debug, info};

use crate::GamepadSource;

/// SDL button for every tracked controller button.
const BUTTON_MAP: &[(SdlButton, Button)] = &[
    (SdlButton::DPadUp, Button::DPadUp),
    (SdlButton::DPadDown, Button::DPadDown),
    (SdlButton::DPadLeft, Button::DPadLeft),
    (SdlButton::DPadRight, Button::DPadRight),
    (SdlButton::A, Button::A),
    (SdlButton::B, Button::B),
    (SdlButton::X, Button::X),
    (SdlButton::Y, Button::Y),
    (SdlButton::LeftShoulder, Button::LeftShoulder),
    (SdlButton::RightShoulder, Button::RightShoulder),
    (SdlButton::Start, Button::Start),
    (SdlButton::Back, Button::Select),
];

/// The first attached SDL game controller.
///
/// SDL handles are not `Send`; construct the pad on the thread that polls it.
pub struct SdlPad {
    _sdl: sdl2::Sdl,
    subsystem: GameControllerSubsystem,
    controller: Option<GameController>,
    name: String,
}

impl SdlPad {
    /// Initialise SDL's game controller subsystem.
    pub fn new() -> Result<Self, String> {
        // No window is ever focused, so controller state must be read in the background.
        sdl2::hint::set("SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS", "1");
        let sdl = sdl2::init()?;
        let subsystem = sdl.game_controller()?;
        Ok(Self {
            _sdl: sdl,
            subsystem,
            controller: None,
            name: "sdl".to_string(),
        })
    }

    fn discover(&self) -> Option<GameController> {
        let count = self.subsystem.num_joysticks().ok()?;
        (0..count)
            .filter(|&id| self.subsystem.is_game_controller(id))
            .find_map(|id| match self.subsystem.open(id) {
                Ok(controller) => Some(controller),
                Err(e) => {
                    debug!("Failed opening controller {id}: {e}");
                    None
                }
            })
    }
}

impl GamepadSource for SdlPad {
    fn poll(&mut self) -> Option<ButtonSample> {
        self.subsystem.update();

        if self.controller.as_ref().is_some_and(|c| !c.attached()) {
            info!("Controller disconnected: {}", self.name);
            self.controller = None;
            self.name = "sdl".to_string();
        }

        if self.controller.is_none() {
            let controller = self.discover()?;
            self.name = controller.name();
            info!("Controller found: {}", self.name);
            self.controller = Some(controller);
        }

        let controller = self.controller.as_ref()?;
        Some(
            BUTTON_MAP
                .iter()
                .filter(|(sdl_button, _)| controller.button(*sdl_button))
                .map(|(_, button)| *button)
                .collect::<ButtonSet>(),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}
