pub const RENDER_WIDTH: i32 = 1280;           // Default window width
pub const RENDER_HEIGHT: i32 = 800;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

// --- Hero carousel ---
pub const HERO_DWELL_DURATION: f32 = 6.0;      // Time each slide stays active (seconds)
pub const CROSSFADE_DWELL_DURATION: f32 = 5.0; // Dwell of the crossfade variant (seconds)
pub const CROSSFADE_DURATION: f32 = 1.0;       // Slide opacity crossfade (seconds)

pub const IMAGE_START_SCALE: f32 = 1.15;       // Ken Burns zoom starts here and settles at 1.0

pub const TEXT_OFFSET_Y: f32 = 60.0;           // Text rises from this far below its resting place
pub const TEXT_DURATION: f32 = 1.0;
pub const TEXT_STAGGER: f32 = 0.1;
pub const TEXT_DELAY: f32 = 0.2;

// --- Scroll reveal ---
pub const REVEAL_START: f32 = 0.85;            // Fraction of viewport height
pub const REVEAL_END: f32 = 0.60;
pub const HERO_REVEAL_OFFSET_Y: f32 = 80.0;
pub const HERO_REVEAL_DURATION: f32 = 1.0;
pub const CROSSFADE_REVEAL_OFFSET_Y: f32 = 50.0;
pub const CROSSFADE_REVEAL_DURATION: f32 = 1.2;

pub const SCRUB_MAX_SCALE: f32 = 1.1;          // Product images zoom to this at the end of their scroll range

// --- Header ---
pub const HERO_HEADER_THRESHOLD: f32 = 100.0;  // Scroll offset (px) past which the header condenses
pub const CROSSFADE_HEADER_THRESHOLD: f32 = 50.0;
pub const HEADER_LINE: f32 = 100.0;            // Light sections under this line turn the header dark
pub const HEADER_HEIGHT: f32 = 72.0;

// --- Page ---
pub const SECTION_HEIGHT: f32 = 600.0;         // Default section height (px)
pub const SMOOTH_SCROLL_DURATION: f32 = 0.6;
pub const SCROLL_STEP: f32 = 60.0;             // Pixels per mouse wheel notch
