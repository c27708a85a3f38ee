use super::domain::{ScoreComponent, SubScore, Tradeoffs};

const KEEP: usize = 3;

struct Weighted {
    text: String,
    magnitude: i32,
}

/// Strongest positives and negatives across the three sub-scores.
///
/// Brightness and fire gains are pros; risk reductions are pros. The reverse
/// are cons. Ties keep component order.
pub fn derive_tradeoffs(brightness: &SubScore, fire: &SubScore, risk: &SubScore) -> Tradeoffs {
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    for part in brightness.components.iter().chain(&fire.components) {
        if part.delta > 0 {
            pros.push(weighted(part, format!("{} (+{})", part.explanation, part.delta)));
        } else if part.delta < 0 {
            cons.push(weighted(part, format!("{} ({})", part.explanation, part.delta)));
        }
    }

    for part in &risk.components {
        if part.delta < 0 {
            pros.push(weighted(part, format!("{} (risk {})", part.explanation, part.delta)));
        } else if part.delta > 0 {
            cons.push(weighted(part, format!("{} (risk +{})", part.explanation, part.delta)));
        }
    }

    Tradeoffs {
        pros: strongest(pros),
        cons: strongest(cons),
    }
}

fn weighted(part: &ScoreComponent, text: String) -> Weighted {
    Weighted {
        text,
        magnitude: part.delta.abs(),
    }
}

fn strongest(mut entries: Vec<Weighted>) -> Vec<String> {
    entries.sort_by(|a, b| b.magnitude.cmp(&a.magnitude));
    entries
        .into_iter()
        .take(KEEP)
        .map(|entry| entry.text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::domain::ScoreCategory;

    fn part(category: ScoreCategory, delta: i32, explanation: &str) -> ScoreComponent {
        ScoreComponent {
            id: explanation.to_lowercase(),
            category,
            delta,
            threshold: String::new(),
            explanation: explanation.to_string(),
        }
    }

    fn sub(components: Vec<ScoreComponent>) -> SubScore {
        SubScore {
            score: 0,
            components,
        }
    }

    #[test]
    fn sorts_by_magnitude_and_keeps_three() {
        let brightness = sub(vec![
            part(ScoreCategory::Brightness, 14, "Pavilion"),
            part(ScoreCategory::Brightness, 5, "Table"),
            part(ScoreCategory::Brightness, -10, "Depth"),
        ]);
        let fire = sub(vec![part(ScoreCategory::Fire, 9, "Crown")]);
        let risk = sub(vec![
            part(ScoreCategory::Risk, -4, "Girdle"),
            part(ScoreCategory::Risk, 25, "Haze"),
        ]);

        let tradeoffs = derive_tradeoffs(&brightness, &fire, &risk);
        assert_eq!(
            tradeoffs.pros,
            vec!["Pavilion (+14)", "Crown (+9)", "Table (+5)"]
        );
        assert_eq!(tradeoffs.cons, vec!["Haze (risk +25)", "Depth (-10)"]);
    }

    #[test]
    fn equal_magnitudes_keep_component_order() {
        let brightness = sub(vec![
            part(ScoreCategory::Brightness, 5, "First"),
            part(ScoreCategory::Brightness, 5, "Second"),
        ]);
        let tradeoffs = derive_tradeoffs(&brightness, &sub(vec![]), &sub(vec![]));
        assert_eq!(tradeoffs.pros, vec!["First (+5)", "Second (+5)"]);
        assert!(tradeoffs.cons.is_empty());
    }
}
