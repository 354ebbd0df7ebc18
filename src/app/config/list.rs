use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListConfig {
    /// Show row ordinals in front of each track
    #[serde(default = "ListConfig::default_show_index")]
    pub show_index: bool,
    /// Pressing a row replaces the play queue with the whole list
    #[serde(default = "ListConfig::default_replace_queue_on_press")]
    pub replace_queue_on_press: bool,
    /// Long-pressing (right-clicking) a row plays it instead of opening its options
    #[serde(default = "ListConfig::default_long_press_plays")]
    pub long_press_plays: bool,
    /// Fraction of the viewport height from the end at which more rows are requested
    #[serde(default = "ListConfig::default_end_reached_threshold")]
    pub end_reached_threshold: f32,
    /// Delay before the locate button hides after scrolling stops
    #[serde(default = "ListConfig::default_locate_hide_delay_ms")]
    pub locate_hide_delay_ms: u64,
    /// Fade in/out duration of the locate button
    #[serde(default = "ListConfig::default_locate_fade_ms")]
    pub locate_fade_ms: u64,
    /// Rows moved per mouse wheel notch
    #[serde(default = "ListConfig::default_wheel_step")]
    pub wheel_step: u16,
}

impl ListConfig {
    fn default_show_index() -> bool {
        true
    }

    fn default_replace_queue_on_press() -> bool {
        true
    }

    fn default_long_press_plays() -> bool {
        false
    }

    fn default_end_reached_threshold() -> f32 {
        0.1
    }

    fn default_locate_hide_delay_ms() -> u64 {
        3000
    }

    fn default_locate_fade_ms() -> u64 {
        200
    }

    fn default_wheel_step() -> u16 {
        3
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            show_index: Self::default_show_index(),
            replace_queue_on_press: Self::default_replace_queue_on_press(),
            long_press_plays: Self::default_long_press_plays(),
            end_reached_threshold: Self::default_end_reached_threshold(),
            locate_hide_delay_ms: Self::default_locate_hide_delay_ms(),
            locate_fade_ms: Self::default_locate_fade_ms(),
            wheel_step: Self::default_wheel_step(),
        }
    }
}
