use chip8_vm::Input;
use minifb::{Key, Window};

const KEY_COUNT: usize = 16;

/// Keypad state sampled from a minifb window.
///
/// The hex keypad is laid out on the left of a QWERTY keyboard:
///
/// ```text
/// 1 2 3 C        1 2 3 4
/// 4 5 6 D   ->   Q W E R
/// 7 8 9 E        A S D F
/// A 0 B F        Z X C V
/// ```
pub struct MiniFBInput {
    key_states: [bool; KEY_COUNT],
}

impl MiniFBInput {
    pub fn new() -> Self {
        Self {
            key_states: [false; KEY_COUNT],
        }
    }

    pub fn update_key_state(&mut self, window: &Window) {
        for key in 0..KEY_COUNT as u8 {
            self.key_states[key as usize] = window.is_key_down(Self::map_key(key));
        }
    }

    fn map_key(key: u8) -> Key {
        match key & 0xF {
            0x1 => Key::Key1,
            0x2 => Key::Key2,
            0x3 => Key::Key3,
            0xC => Key::Key4,

            0x4 => Key::Q,
            0x5 => Key::W,
            0x6 => Key::E,
            0xD => Key::R,

            0x7 => Key::A,
            0x8 => Key::S,
            0x9 => Key::D,
            0xE => Key::F,

            0xA => Key::Z,
            0x0 => Key::X,
            0xB => Key::C,
            _ => Key::V,
        }
    }
}

impl Input for MiniFBInput {
    fn is_key_down(&self, key: u8) -> bool {
        self.key_states[(key & 0xF) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::MiniFBInput;
    use chip8_vm::Input;
    use minifb::Key;

    #[test]
    fn test_every_keypad_key_has_a_distinct_mapping() {
        let mapped: Vec<Key> = (0..16).map(MiniFBInput::map_key).collect();

        for (i, key) in mapped.iter().enumerate() {
            assert!(
                mapped[i + 1..].iter().all(|other| other != key),
                "keypad key {:X} shares its mapping",
                i
            );
        }
    }

    #[test]
    fn test_new_has_no_keys_down() {
        let input = MiniFBInput::new();

        assert!((0..16).all(|key| !input.is_key_down(key)));
    }
}
