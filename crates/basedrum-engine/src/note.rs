//! Pitch-class and scale-degree naming.

/// The twelve pitch classes, sharps only, indexed 0-11 from C.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Returns the name of a pitch class (0-11). Indices wrap modulo 12.
pub fn pitch_class_name(pitch_class: u8) -> &'static str {
    PITCH_CLASSES[(pitch_class % 12) as usize]
}

/// Formats a note name like "C#2" from a pitch class and octave.
pub fn note_name(pitch_class: u8, octave: i8) -> String {
    format!("{}{}", pitch_class_name(pitch_class), octave)
}

/// Resolves a 1-based scale degree within a key to a concrete note name.
///
/// Degrees past the octave wrap and raise the octave, so degree 8 in C is the
/// next C up.
pub fn scale_degree_name(key: u8, intervals: &[i32; 7], degree: u8, octave: i8) -> String {
    let index = (degree.max(1) - 1) as usize;
    let interval = intervals[index % 7] + 12 * (index / 7) as i32;
    let semitone = key as i32 + interval;
    note_name((semitone % 12) as u8, octave + (semitone / 12) as i8)
}
