use serde::Serialize;

use crate::models::DrawHistory;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub contest_id: u32,
    pub rate: Option<f64>,
}

/// Moyenne mobile de la présence (0/1) de `number` sur `window` tirages.
/// `rate` reste vide tant que la fenêtre n'est pas pleine.
pub fn presence_moving_average(history: &DrawHistory, number: u8, window: usize) -> Vec<TrendPoint> {
    let window = window.max(1);
    let presence: Vec<u32> = history
        .draws()
        .iter()
        .map(|d| d.contains(number) as u32)
        .collect();

    let mut running = 0u32;
    history
        .draws()
        .iter()
        .enumerate()
        .map(|(i, d)| {
            running += presence[i];
            if i >= window {
                running -= presence[i - window];
            }
            let rate = (i + 1 >= window).then(|| running as f64 / window as f64);
            TrendPoint {
                contest_id: d.contest_id,
                rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_history;

    #[test]
    fn test_moving_average_warmup() {
        let history = make_test_history(6);
        let points = presence_moving_average(&history, 1, 3);
        assert_eq!(points.len(), 6);
        assert!(points[0].rate.is_none());
        assert!(points[1].rate.is_none());
        assert!(points[2].rate.is_some());
    }

    #[test]
    fn test_moving_average_values() {
        // 1 n'est présent que dans le concours 1 (1..15)
        let history = make_test_history(4);
        let points = presence_moving_average(&history, 1, 2);
        assert_eq!(points[1].rate, Some(0.5));
        assert_eq!(points[2].rate, Some(0.0));
        // 10 est présent partout
        let points = presence_moving_average(&history, 10, 2);
        assert!(points.iter().skip(1).all(|p| p.rate == Some(1.0)));
    }

    #[test]
    fn test_moving_average_zero_window() {
        let history = make_test_history(2);
        let points = presence_moving_average(&history, 1, 0);
        assert_eq!(points[0].rate, Some(1.0));
        assert_eq!(points[1].rate, Some(0.0));
    }
}
