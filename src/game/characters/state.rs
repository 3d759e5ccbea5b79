// Runner state: alive/dead, grounded/airborne, jumps used

/// Coarse posture derived from [`CharacterState`]; names the animator clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Posture {
    /// Touching walkable ground
    Running,
    /// In the air
    Airborne,
    /// Terminal
    Dead,
}

impl Posture {
    /// Get the animation name for this posture
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Running => "run",
            Self::Airborne => "jump",
            Self::Dead => "die",
        }
    }
}

/// Mutable state of a runner
///
/// `is_dead` only ever goes from false to true. `jump_count` only changes
/// through [`register_jump`](Self::register_jump) and [`land`](Self::land).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterState {
    is_dead: bool,
    is_grounded: bool,
    jump_count: u32,
}

impl CharacterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn jump_count(&self) -> u32 {
        self.jump_count
    }

    /// Check whether another jump is allowed under the given cap
    pub fn can_jump(&self, max_jumps: u32) -> bool {
        !self.is_dead && self.jump_count < max_jumps
    }

    /// Consume one jump
    pub fn register_jump(&mut self) {
        self.jump_count += 1;
    }

    /// Touch walkable ground: grounded, jumps refilled
    pub fn land(&mut self) {
        self.is_grounded = true;
        self.jump_count = 0;
    }

    /// Lose contact with a surface
    pub fn leave_ground(&mut self) {
        self.is_grounded = false;
    }

    /// Terminal transition
    pub fn kill(&mut self) {
        self.is_dead = true;
    }

    pub fn posture(&self) -> Posture {
        if self.is_dead {
            Posture::Dead
        } else if self.is_grounded {
            Posture::Running
        } else {
            Posture::Airborne
        }
    }
}
