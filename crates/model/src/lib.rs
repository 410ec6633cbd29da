pub use serde_with;

pub mod coordinate;
pub mod journey;
pub mod waypoint;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// Formats a distance the way it is shown to travellers, e.g.
/// `~1,234 Nautical Miles`.
pub fn format_nautical_miles(distance: f64) -> String {
    let rounded = distance.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("~{} Nautical Miles", grouped)
}
