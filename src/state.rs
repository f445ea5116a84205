#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CarouselState {
    Idle,    // Built, not started yet
    Running, // Advancing on its timer
    Stopped, // Torn down, never restarts
}
