//=========================================================================
// Platform Event Mapper
//=========================================================================
//
// Converts Winit window events into engine `InputEvent`s.
//
// Architecture:
//   WindowEvent → EventMapper → Option<InputEvent> → pending batch
//
// Stateful modifier tracking: modifier state from `ModifiersChanged` is
// cached and stamped onto every later key and mouse-button event. Keys
// with no engine equivalent (F13-F24, media keys) are filtered out.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== EventMapper =========================================================

/// Maps Winit events to engine events, remembering held modifiers.
#[derive(Debug, Default)]
pub struct EventMapper {
    modifiers: Modifiers,
}

impl EventMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Updates cached modifier state (applied to subsequent events).
    pub fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    /// Translates one window event.
    ///
    /// `CloseRequested` becomes `Quit`. Modifier changes only update the
    /// cache. Anything the scene does not consume (resize, focus, redraw)
    /// yields `None`.
    pub fn map(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform", "Modifiers changed: {:?}", state);
                self.update_modifiers(state.state());
                None
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let mapped = self.map_key(event.physical_key, event.state);
                if mapped.is_none() {
                    trace!(target: "platform", "Unmapped key ignored: {:?}", event.physical_key);
                }
                mapped
            }

            WindowEvent::MouseInput { state, button, .. } => {
                Some(self.map_mouse_button(*button, *state))
            }

            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),

            _ => None,
        }
    }

    /// Converts a physical key transition (filters unmapped keys).
    pub fn map_key(&self, physical_key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };

        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown {
                key,
                modifiers: self.modifiers,
            },
            ElementState::Released => InputEvent::KeyUp {
                key,
                modifiers: self.modifiers,
            },
        })
    }

    /// Converts a mouse button transition (with modifiers).
    pub fn map_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown {
                button,
                modifiers: self.modifiers,
            },
            ElementState::Released => InputEvent::MouseButtonUp {
                button,
                modifiers: self.modifiers,
            },
        }
    }
}

/// Stateless one-shot mapping; modifiers are reported as released.
pub fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    EventMapper::new().map(event)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Maps A-Z, 0-9, arrows, and the keys games commonly poll. Everything
/// else becomes `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            ControlLeft => KeyCode::ControlLeft,
            ControlRight => KeyCode::ControlRight,
            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Left/Right/Middle map directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
