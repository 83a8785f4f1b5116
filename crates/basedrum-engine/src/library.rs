//! Hand-authored base template banks.
//!
//! One bank per instrument role, each template a 16-step grid. Percussive
//! templates use 1 for a hit; melodic templates carry 1-based scale degrees.
//! Zero is silence everywhere. Template choice is a tiered threshold band per
//! role, not continuous interpolation, so nearby identities still land on
//! recognizably distinct grooves.

use serde::Serialize;

/// Instrument role, governing generation order and mix priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Kick; always generated.
    Foundation,
    /// Snare/clap layer.
    Rhythm,
    /// Bassline.
    Harmony,
    /// Hats and shakers.
    Texture,
    /// Top-line melody.
    Lead,
}

impl Role {
    /// Returns the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Foundation => "foundation",
            Role::Rhythm => "rhythm",
            Role::Harmony => "harmony",
            Role::Texture => "texture",
            Role::Lead => "lead",
        }
    }

    /// Whether the role carries pitched material.
    pub fn is_melodic(&self) -> bool {
        matches!(self, Role::Harmony | Role::Lead)
    }

    /// Default trigger velocity when a track carries no per-step override.
    pub fn default_velocity(&self) -> f64 {
        match self {
            Role::Foundation => 1.0,
            Role::Rhythm => 0.9,
            Role::Harmony => 0.8,
            Role::Texture => 0.6,
            Role::Lead => 0.75,
        }
    }

    /// Generation order: foundation first, lead last.
    pub fn all() -> &'static [Role] {
        &[
            Role::Foundation,
            Role::Rhythm,
            Role::Harmony,
            Role::Texture,
            Role::Lead,
        ]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 16-step base template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Groove name, used in presets and reason strings.
    pub name: &'static str,
    /// Step grid: 0 = silence, 1 = hit (percussive) or scale degree (melodic).
    pub steps: [u8; 16],
}

impl Template {
    /// Step indices carrying a hit or note.
    pub fn hit_indices(&self) -> Vec<u32> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, &slot)| slot != 0)
            .map(|(i, _)| i as u32)
            .collect()
    }
}

// Foundation bank, picked by energy.
const FOUR_ON_FLOOR: Template = Template {
    name: "four-on-floor",
    steps: [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
};
const BROKEN: Template = Template {
    name: "broken",
    steps: [1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0],
};
const SYNCOPATED: Template = Template {
    name: "syncopated",
    steps: [1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0],
};
const SPARSE: Template = Template {
    name: "sparse",
    steps: [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
};

// Rhythm bank, picked by density.
const BACKBEAT: Template = Template {
    name: "backbeat",
    steps: [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
};
const PUSHED: Template = Template {
    name: "pushed",
    steps: [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
};
const BUSY: Template = Template {
    name: "busy",
    steps: [0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1],
};

// Harmony bank (scale degrees), picked by complexity.
const PEDAL: Template = Template {
    name: "pedal",
    steps: [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
};
const ROOT_FIFTH: Template = Template {
    name: "root-fifth",
    steps: [1, 0, 0, 0, 5, 0, 0, 0, 1, 0, 0, 0, 5, 0, 0, 0],
};
const WALKING: Template = Template {
    name: "walking",
    steps: [1, 0, 3, 0, 5, 0, 6, 0, 1, 0, 5, 0, 3, 0, 2, 0],
};

// Texture bank, picked by density.
const OFFBEAT_HATS: Template = Template {
    name: "offbeat-hats",
    steps: [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
};
const EIGHTHS: Template = Template {
    name: "eighths",
    steps: [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
};
const SIXTEENTHS: Template = Template {
    name: "sixteenths",
    steps: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
};

// Lead bank (scale degrees), picked by energy.
const MOTIF: Template = Template {
    name: "motif",
    steps: [5, 0, 0, 0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 0, 0],
};
const CLIMBING: Template = Template {
    name: "climbing",
    steps: [1, 0, 0, 3, 0, 0, 5, 0, 0, 0, 6, 0, 5, 0, 0, 0],
};

/// Picks the kick groove for an energy level.
pub fn foundation_template(energy: f64) -> &'static Template {
    if energy > 0.8 {
        &FOUR_ON_FLOOR
    } else if energy > 0.6 {
        &BROKEN
    } else if energy > 0.4 {
        &SYNCOPATED
    } else {
        &SPARSE
    }
}

/// Picks the snare groove for a density level.
pub fn rhythm_template(density: f64) -> &'static Template {
    if density > 0.7 {
        &BUSY
    } else if density > 0.5 {
        &PUSHED
    } else {
        &BACKBEAT
    }
}

/// Picks the bass figure for a complexity level.
pub fn harmony_template(complexity: f64) -> &'static Template {
    if complexity > 0.7 {
        &WALKING
    } else if complexity > 0.4 {
        &ROOT_FIFTH
    } else {
        &PEDAL
    }
}

/// Picks the hat figure for a density level.
pub fn texture_template(density: f64) -> &'static Template {
    if density > 0.8 {
        &SIXTEENTHS
    } else if density > 0.6 {
        &EIGHTHS
    } else {
        &OFFBEAT_HATS
    }
}

/// Picks the lead figure for an energy level.
pub fn lead_template(energy: f64) -> &'static Template {
    if energy > 0.7 {
        &CLIMBING
    } else {
        &MOTIF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_bands_pick_distinct_kicks() {
        assert_eq!(foundation_template(0.9).name, "four-on-floor");
        assert_eq!(foundation_template(0.7).name, "broken");
        assert_eq!(foundation_template(0.5).name, "syncopated");
        assert_eq!(foundation_template(0.2).name, "sparse");
    }

    #[test]
    fn every_foundation_template_anchors_the_downbeat() {
        for energy in [0.1, 0.5, 0.7, 0.9] {
            assert_eq!(foundation_template(energy).steps[0], 1);
        }
    }

    #[test]
    fn four_on_floor_hits_every_quarter() {
        assert_eq!(FOUR_ON_FLOOR.hit_indices(), vec![0, 4, 8, 12]);
    }

    #[test]
    fn melodic_templates_use_valid_degrees() {
        for template in [&PEDAL, &ROOT_FIFTH, &WALKING, &MOTIF, &CLIMBING] {
            for &slot in &template.steps {
                assert!(slot <= 7, "{} has degree {}", template.name, slot);
            }
        }
    }

    #[test]
    fn backbeat_is_two_and_four() {
        assert_eq!(BACKBEAT.hit_indices(), vec![4, 12]);
    }
}
