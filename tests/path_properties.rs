//! Behavioral properties of the path data builder

use std::f64::consts::{FRAC_PI_2, PI};

use pretty_assertions::assert_eq;
use svg_utils::{decode_base64, encode_base64, PathData};

/// Split a `d` string into (command, coordinates) pairs
fn commands(d: &str) -> Vec<(char, Vec<f64>)> {
    let mut out: Vec<(char, Vec<f64>)> = Vec::new();
    let mut current = String::new();
    let flush = |cmd: Option<char>, text: &mut String, out: &mut Vec<(char, Vec<f64>)>| {
        if let Some(c) = cmd {
            let coords = text
                .split(',')
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().expect("coordinate should parse"))
                .collect();
            out.push((c, coords));
        }
        text.clear();
    };

    let mut cmd = None;
    for ch in d.chars() {
        if matches!(ch, 'M' | 'L' | 'Q' | 'C' | 'Z') {
            flush(cmd, &mut current, &mut out);
            cmd = Some(ch);
        } else {
            current.push(ch);
        }
    }
    flush(cmd, &mut current, &mut out);
    out
}

#[test]
fn test_commands_concatenate_in_order() {
    let mut path = PathData::new();
    path.move_to(1.0, 2.0)
        .unwrap()
        .line_to(&[3.0, 4.0])
        .unwrap()
        .close_path()
        .move_to(-5.5, 6.25)
        .unwrap()
        .line_to(&[7.0, 8.0, 9.0, 10.0])
        .unwrap();

    assert_eq!(path.as_str(), "M1,2L3,4ZM-5.5,6.25L7,8,9,10");
}

#[test]
fn test_reset_returns_everything_since_last_reset() {
    let mut path = PathData::new();
    path.move_to(0.0, 0.0).unwrap();
    assert_eq!(path.reset(), "M0,0");

    path.line_to(&[1.0, 1.0]).unwrap().close_path();
    assert_eq!(path.reset(), "L1,1Z");
    assert_eq!(path.reset(), "");
}

#[test]
fn test_rect_equals_manual_path() {
    let mut rect = PathData::new();
    rect.rect(10.0, 10.0, 20.0, 30.0).unwrap();

    let mut manual = PathData::new();
    manual
        .move_to(10.0, 10.0)
        .unwrap()
        .line_to(&[30.0, 10.0, 30.0, 40.0, 10.0, 40.0])
        .unwrap()
        .close_path();

    assert_eq!(rect.reset(), manual.reset());
}

#[test]
fn test_circle_four_vertices_at_quarter_turns() {
    let mut path = PathData::new();
    path.circle(0.0, 0.0, 10.0, 4).unwrap();
    let parsed = commands(&path.reset());

    let kinds: Vec<char> = parsed.iter().map(|(c, _)| *c).collect();
    assert_eq!(kinds, vec!['M', 'L', 'L', 'L', 'Z']);

    let angles = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];
    for ((_, coords), angle) in parsed.iter().zip(angles) {
        assert_eq!(coords.len(), 2);
        assert!((coords[0] - 10.0 * f64::cos(angle)).abs() < 1e-9);
        assert!((coords[1] - 10.0 * f64::sin(angle)).abs() < 1e-9);
    }
}

#[test]
fn test_circle_vertices_lie_on_radius() {
    let mut path = PathData::new();
    path.circle(50.0, 250.0, 25.0, 8).unwrap();
    let parsed = commands(path.as_str());
    assert_eq!(parsed.len(), 9);

    for (_, coords) in parsed.iter().filter(|(c, _)| *c != 'Z') {
        let dx = coords[0] - 50.0;
        let dy = coords[1] - 250.0;
        assert!(((dx * dx + dy * dy).sqrt() - 25.0).abs() < 1e-9);
    }
}

#[test]
fn test_round_rect_is_one_closed_contour() {
    let mut path = PathData::new();
    path.round_rect(0.0, 0.0, 40.0, 20.0, 4.0).unwrap();
    let parsed = commands(path.as_str());

    let kinds: String = parsed.iter().map(|(c, _)| *c).collect();
    assert_eq!(kinds, "MLQLQLQLQZ");

    // The last curve ends where the contour started
    let start = &parsed[0].1;
    let last_curve = &parsed[8].1;
    assert_eq!(&last_curve[2..], &start[..]);
}

#[test]
fn test_failed_calls_do_not_change_buffer() {
    let mut path = PathData::new();
    path.move_to(1.0, 1.0).unwrap();

    assert!(path.line_to(&[]).is_err());
    assert!(path.polygon(&[0.0, 0.0]).is_err());
    assert!(path.circle(0.0, 0.0, 1.0, 0).is_err());
    assert!(path.rect(0.0, 0.0, f64::INFINITY, 1.0).is_err());
    assert!(path
        .bezier_curve_to(0.0, 0.0, 0.0, 0.0, 0.0, f64::NAN)
        .is_err());

    assert_eq!(path.as_str(), "M1,1");
}

#[test]
fn test_base64_round_trips_multibyte_text() {
    let samples = [
        "全ての座標は絶対座標によって出力される",
        "Ünïcödé ✓",
        "<svg>🎨</svg>",
    ];
    for text in samples {
        let encoded = encode_base64(text);
        assert!(encoded.is_ascii());
        assert_eq!(decode_base64(&encoded).unwrap(), text);
        assert_eq!(encode_base64(&decode_base64(&encoded).unwrap()), encoded);
    }
}
