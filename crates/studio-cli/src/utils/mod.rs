use core::fmt::Display;
use std::{ops::RangeInclusive, str::FromStr};

use anyhow::Context;
use clap::ValueEnum;
use studio::{config::IntegratorKind, render::Region, scene::examples::ExampleScene};

/// Parses `AxB` into two numbers
fn parse_pair(s: &str) -> anyhow::Result<(u32, u32)> {
    let Some((a, b)) = s.split_once('x') else {
        return Err(anyhow::anyhow!("Incorrect format `{s}`, expected `AxB`"));
    };
    Ok((a.trim().parse()?, b.trim().parse()?))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = parse_pair(s)?;
        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}

/// Number of tiles along each axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileCounts {
    pub x: u32,
    pub y: u32,
}

impl FromStr for TileCounts {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_pair(s)?;
        Ok(TileCounts { x, y })
    }
}

/// `x,y,width,height`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionArg(pub Region);

impl FromStr for RegionArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Incorrect region `{s}`"))?;
        let [x, y, width, height] = values[..] else {
            return Err(anyhow::anyhow!(
                "Incorrect region `{s}`, expected `x,y,width,height`"
            ));
        };
        Ok(RegionArg(Region {
            x,
            y,
            width,
            height,
        }))
    }
}

/// `a..b` (inclusive) or a single frame `a`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frames(pub RangeInclusive<u32>);

impl FromStr for Frames {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let r = match s.split_once("..") {
            Some((a, b)) => a.parse()?..=b.parse()?,
            None => {
                let frame = s.parse()?;
                frame..=frame
            }
        };
        if r.is_empty() {
            return Err(anyhow::anyhow!("Frame range `{s}` is empty"));
        }
        Ok(Frames(r))
    }
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableScene {
    #[default]
    Spheres,
    Room,
}

impl From<AvailableScene> for ExampleScene {
    fn from(val: AvailableScene) -> Self {
        match val {
            AvailableScene::Spheres => ExampleScene::Spheres,
            AvailableScene::Room => ExampleScene::Room,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash)]
pub enum AvailableIntegrator {
    #[default]
    Path,
    Direct,
}

impl AvailableIntegrator {
    pub fn with_depths(self, rr_depth: u32, max_depth: Option<u32>) -> IntegratorKind {
        match self {
            AvailableIntegrator::Path => IntegratorKind::Path {
                russian_roulette_depth: rr_depth,
            },
            AvailableIntegrator::Direct => IntegratorKind::Direct { max_depth },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dimensions_and_tiles() {
        let d: Dimensions = "640x480".parse().unwrap();
        assert_eq!((d.width, d.height), (640, 480));
        assert_eq!(d.to_string(), "640x480");
        assert!("640".parse::<Dimensions>().is_err());
        assert!("ax480".parse::<Dimensions>().is_err());

        let t: TileCounts = "4x3".parse().unwrap();
        assert_eq!(t, TileCounts { x: 4, y: 3 });
    }

    #[test]
    fn parse_region() {
        let RegionArg(region) = "10,20,30,40".parse().unwrap();
        assert_eq!(
            region,
            Region {
                x: 10,
                y: 20,
                width: 30,
                height: 40
            }
        );
        assert!("10,20,30".parse::<RegionArg>().is_err());
        assert!("10,20,30,-4".parse::<RegionArg>().is_err());
    }

    #[test]
    fn parse_frames() {
        assert_eq!("3".parse::<Frames>().unwrap(), Frames(3..=3));
        assert_eq!("2..5".parse::<Frames>().unwrap(), Frames(2..=5));
        assert!("5..2".parse::<Frames>().is_err());
    }
}
