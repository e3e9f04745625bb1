//! Easing curves for timeline tweens.
//!
//! Curves are defined as an "in" shape; "out" and "in-out" variants are
//! derived by reflection. Names parse from the strings page authors already
//! use, e.g. `"easeOutElastic(1, .8)"` or `"easeInBack(1.7)"`.

use std::f32::consts::{PI, TAU};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Quad,
    Cubic,
    Quart,
    Sine,
    Back { overshoot: f32 },
    Elastic { amplitude: f32, period: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    In(Shape),
    Out(Shape),
    InOut(Shape),
}

pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

impl Easing {
    pub const OUT_CUBIC: Easing = Easing::Out(Shape::Cubic);
    pub const IN_CUBIC: Easing = Easing::In(Shape::Cubic);
    pub const OUT_QUART: Easing = Easing::Out(Shape::Quart);
    pub const IN_QUART: Easing = Easing::In(Shape::Quart);
    pub const IN_OUT_QUART: Easing = Easing::InOut(Shape::Quart);
    pub const IN_OUT_SINE: Easing = Easing::InOut(Shape::Sine);

    pub const fn out_elastic(amplitude: f32, period: f32) -> Easing {
        Easing::Out(Shape::Elastic { amplitude, period })
    }

    pub const fn in_back(overshoot: f32) -> Easing {
        Easing::In(Shape::Back { overshoot })
    }

    /// Map linear progress in \[0, 1\] to eased progress. Endpoints are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::In(s) => s.ease_in(t),
            Easing::Out(s) => 1.0 - s.ease_in(1.0 - t),
            Easing::InOut(s) => {
                if t < 0.5 {
                    s.ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - s.ease_in(2.0 - t * 2.0) / 2.0
                }
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::OUT_CUBIC
    }
}

impl Shape {
    fn ease_in(self, t: f32) -> f32 {
        match self {
            Shape::Quad => t * t,
            Shape::Cubic => t * t * t,
            Shape::Quart => t * t * t * t,
            Shape::Sine => 1.0 - (t * PI / 2.0).cos(),
            Shape::Back { overshoot: s } => t * t * ((s + 1.0) * t - s),
            Shape::Elastic { amplitude, period } => {
                let a = amplitude.clamp(1.0, 10.0);
                let p = period.clamp(0.1, 2.0);
                let shift = p / TAU * (1.0 / a).asin();
                -a * 2f32.powf(10.0 * (t - 1.0)) * (((t - 1.0) - shift) * TAU / p).sin()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EasingParseError {
    #[error("unknown easing name `{0}`")]
    UnknownName(String),
    #[error("bad easing parameter `{0}`")]
    BadParameter(String),
}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, args) = match s.find('(') {
            Some(open) => {
                let close = s
                    .rfind(')')
                    .filter(|&c| c > open)
                    .ok_or_else(|| EasingParseError::BadParameter(s.to_string()))?;
                (&s[..open], Some(&s[open + 1..close]))
            }
            None => (s, None),
        };
        let params = parse_params(args)?;
        if name == "linear" {
            return Ok(Easing::Linear);
        }
        let (dir, shape_name) = if let Some(rest) = name.strip_prefix("easeInOut") {
            (2, rest)
        } else if let Some(rest) = name.strip_prefix("easeIn") {
            (0, rest)
        } else if let Some(rest) = name.strip_prefix("easeOut") {
            (1, rest)
        } else {
            return Err(EasingParseError::UnknownName(name.to_string()));
        };
        let arg = |i: usize, default: f32| params.get(i).copied().unwrap_or(default);
        let shape = match shape_name {
            "Quad" => Shape::Quad,
            "Cubic" => Shape::Cubic,
            "Quart" => Shape::Quart,
            "Sine" => Shape::Sine,
            "Back" => Shape::Back {
                overshoot: arg(0, DEFAULT_BACK_OVERSHOOT),
            },
            "Elastic" => Shape::Elastic {
                amplitude: arg(0, 1.0),
                period: arg(1, 0.5),
            },
            _ => return Err(EasingParseError::UnknownName(name.to_string())),
        };
        Ok(match dir {
            0 => Easing::In(shape),
            1 => Easing::Out(shape),
            _ => Easing::InOut(shape),
        })
    }
}

fn parse_params(args: Option<&str>) -> Result<smallvec::SmallVec<[f32; 2]>, EasingParseError> {
    let mut out = smallvec::SmallVec::new();
    let Some(args) = args else {
        return Ok(out);
    };
    for part in args.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let v: f32 = part
            .parse()
            .map_err(|_| EasingParseError::BadParameter(part.to_string()))?;
        out.push(v);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::OUT_CUBIC,
        Easing::IN_CUBIC,
        Easing::OUT_QUART,
        Easing::IN_OUT_QUART,
        Easing::IN_OUT_SINE,
        Easing::out_elastic(1.0, 0.6),
        Easing::in_back(1.7),
    ];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
            assert_eq!(e.apply(-3.0), 0.0);
            assert_eq!(e.apply(7.0), 1.0);
        }
    }

    #[test]
    fn elastic_overshoots_and_back_undershoots() {
        let elastic = Easing::out_elastic(1.0, 0.6);
        let peak = (1..100)
            .map(|i| elastic.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
        let back = Easing::in_back(1.7);
        assert!(back.apply(0.2) < 0.0);
    }

    #[test]
    fn in_out_is_symmetric() {
        let e = Easing::IN_OUT_SINE;
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn parses_page_names() {
        assert_eq!("linear".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!("easeOutQuart".parse::<Easing>(), Ok(Easing::OUT_QUART));
        assert_eq!("easeInOutSine".parse::<Easing>(), Ok(Easing::IN_OUT_SINE));
        assert_eq!(
            "easeOutElastic(1, .8)".parse::<Easing>(),
            Ok(Easing::out_elastic(1.0, 0.8))
        );
        assert_eq!("easeInBack(1.7)".parse::<Easing>(), Ok(Easing::in_back(1.7)));
        assert_eq!(
            "easeInBack".parse::<Easing>(),
            Ok(Easing::in_back(DEFAULT_BACK_OVERSHOOT))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "bounce".parse::<Easing>(),
            Err(EasingParseError::UnknownName(_))
        ));
        assert!(matches!(
            "easeOutElastic(1, x)".parse::<Easing>(),
            Err(EasingParseError::BadParameter(_))
        ));
        assert!(matches!(
            "easeOutWobble".parse::<Easing>(),
            Err(EasingParseError::UnknownName(_))
        ));
    }
}
