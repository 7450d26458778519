/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 16.0;
    pub const PADDLE_HEIGHT: f32 = 96.0;
    pub const PADDLE_SPEED: f32 = 8.0; // pixels per tick
    pub const AI_PADDLE_SPEED_FACTOR: f32 = 0.85;
    pub const PADDLE_LAYOUT_WIDTHS: f32 = 6.0; // min arena width in paddle widths

    // Ball
    pub const BALL_RADIUS: f32 = 9.0;
    pub const BALL_SPEED_INITIAL: f32 = 5.0;
    pub const BALL_SPEED_MAX: f32 = 15.0;
    pub const BALL_SPEED_INCREASE: f32 = 0.2; // Added to |vx| on paddle hit
    pub const BALL_LAUNCH_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    pub const DEFLECTION_FACTOR: f32 = 0.75;

    // Score
    pub const TARGET_SCORE: u32 = 10;

    // AI
    pub const AI_EASY: (f32, f32) = (0.05, 50.0); // (reaction speed, error margin)
    pub const AI_MEDIUM: (f32, f32) = (0.12, 25.0);
    pub const AI_HARD: (f32, f32) = (0.3, 10.0);
    pub const AI_PRESSURE_WINDOW: u32 = 2;
    pub const AI_PRESSURE_FACTOR: f32 = 0.7;
    pub const AI_MIN_ERROR_MARGIN: f32 = 5.0;

    // Commentary
    pub const LONG_RALLY_EVERY: u32 = 5;
    pub const FAST_BALL_FACTOR: f32 = 1.5;
}
