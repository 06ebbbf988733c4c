//! InputSource - внешний коллаборатор (устройства ввода)
//!
//! Опрашивается один раз за logic тик. Биндинги клавиш - забота хоста,
//! сюда приходят уже логические actions.

use bevy::prelude::*;

/// Логические кнопки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAction {
    Jump,
    Crouch,
    Dash,
    Attack,
}

/// Источник input'а (клавиатура, геймпад, replay, скрипт)
pub trait InputSource: Send + Sync {
    /// Вызывается в начале каждого logic тика (перед чтением)
    fn begin_frame(&mut self) {}

    /// Горизонтальная ось: -1.0 … +1.0
    fn horizontal_axis(&self) -> f32;

    /// Кнопка нажата в этом тике (down edge)
    fn pressed(&self, action: InputAction) -> bool;

    /// Кнопка отпущена в этом тике (up edge)
    fn released(&self, action: InputAction) -> bool;
}

/// Input игрока (Resource)
#[derive(Resource)]
pub struct PlayerInput {
    pub source: Box<dyn InputSource>,
}

impl PlayerInput {
    pub fn new(source: impl InputSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

/// Один logic тик скриптованного input'а
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub axis: f32,
    pub pressed: Vec<InputAction>,
    pub released: Vec<InputAction>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: f32) -> Self {
        self.axis = axis;
        self
    }

    pub fn press(mut self, action: InputAction) -> Self {
        self.pressed.push(action);
        self
    }

    pub fn release(mut self, action: InputAction) -> Self {
        self.released.push(action);
        self
    }
}

/// Скриптованный input для headless прогонов и тестов
///
/// Каждый `begin_frame` переходит к следующему кадру; после конца скрипта - idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputFrame>,
    /// Индекс текущего кадра + 1 (0 = ещё не начали)
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Добавить `count` одинаковых кадров
    pub fn then(mut self, frame: InputFrame, count: usize) -> Self {
        self.frames.extend(std::iter::repeat(frame).take(count));
        self
    }

    pub fn is_finished(&self) -> bool {
        self.cursor > self.frames.len()
    }

    fn current(&self) -> Option<&InputFrame> {
        self.cursor.checked_sub(1).and_then(|index| self.frames.get(index))
    }
}

impl InputSource for ScriptedInput {
    fn begin_frame(&mut self) {
        if self.cursor <= self.frames.len() {
            self.cursor += 1;
        }
    }

    fn horizontal_axis(&self) -> f32 {
        self.current().map_or(0.0, |frame| frame.axis)
    }

    fn pressed(&self, action: InputAction) -> bool {
        self.current().is_some_and(|frame| frame.pressed.contains(&action))
    }

    fn released(&self, action: InputAction) -> bool {
        self.current().is_some_and(|frame| frame.released.contains(&action))
    }
}
