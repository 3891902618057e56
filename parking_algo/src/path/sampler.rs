//! Evenly spaced samples of a path over the travel range

use nalgebra::Point2;

use super::PathProvider;
use crate::error::Result;
use crate::geometry::TravelRange;

/// Discretization of `[0, range)` into `count` evenly spaced stations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSampler {
    range: f32,
    count: usize,
}

impl PathSampler {
    pub fn new(travel: &TravelRange) -> Self {
        Self {
            range: travel.scaled,
            count: travel.sample_count(),
        }
    }

    /// Distance between consecutive stations
    pub fn step(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.range / self.count as f32
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Longitudinal coordinate of station `index`
    pub fn x_at(&self, index: usize) -> f32 {
        index as f32 * self.step()
    }

    /// Lazily evaluate `provider` at every station.
    ///
    /// The returned iterator can be cloned to restart from the first station.
    pub fn samples<'a, P: PathProvider + ?Sized>(&self, provider: &'a P) -> PathSamples<'a, P> {
        PathSamples {
            sampler: *self,
            provider,
            index: 0,
        }
    }
}

/// Iterator over `(x, evaluate(x))` points
pub struct PathSamples<'a, P: ?Sized> {
    sampler: PathSampler,
    provider: &'a P,
    index: usize,
}

impl<P: ?Sized> Clone for PathSamples<'_, P> {
    fn clone(&self) -> Self {
        Self {
            sampler: self.sampler,
            provider: self.provider,
            index: self.index,
        }
    }
}

impl<P: PathProvider + ?Sized> Iterator for PathSamples<'_, P> {
    type Item = Result<Point2<f32>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.sampler.count {
            return None;
        }
        let x = self.sampler.x_at(self.index);
        self.index += 1;
        Some(self.provider.evaluate(x).map(|y| Point2::new(x, y)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<P: PathProvider + ?Sized> ExactSizeIterator for PathSamples<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::TwoArcPath;
    use approx::assert_relative_eq;

    fn demo() -> (PathSampler, TwoArcPath) {
        let travel = TravelRange::from_radius(24.0, 5.0).unwrap();
        let mut path = TwoArcPath::new();
        path.configure_primary(120.0);
        path.configure_offset(107.5);
        (PathSampler::new(&travel), path)
    }

    #[test]
    fn test_sample_count() {
        let (sampler, path) = demo();
        // travel range 48 * 2 * scale 5
        assert_eq!(sampler.len(), 480);
        let samples = sampler.samples(&path);
        assert_eq!(samples.len(), 480);
        assert_eq!(samples.count(), 480);
    }

    #[test]
    fn test_even_spacing_within_range() {
        let (sampler, path) = demo();
        let points: Vec<_> = sampler
            .samples(&path)
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(points[0].x, 0.0);
        assert!(points.last().unwrap().x < 240.0);
        for pair in points.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert_relative_eq!(pair[1].x - pair[0].x, sampler.step(), epsilon = 1e-4);
        }
        assert_relative_eq!(sampler.step(), 0.5);
    }

    #[test]
    fn test_samples_lie_on_path() {
        let (sampler, path) = demo();
        for point in sampler.samples(&path) {
            let point = point.unwrap();
            assert_eq!(point.y, path.evaluate(point.x).unwrap());
        }
    }

    #[test]
    fn test_restartable() {
        let (sampler, path) = demo();
        let mut samples = sampler.samples(&path);
        let fresh = samples.clone();
        samples.nth(10);

        let first: Vec<_> = fresh.clone().map(|p| p.unwrap()).collect();
        let second: Vec<_> = fresh.map(|p| p.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(samples.len(), 480 - 11);
    }

    #[test]
    fn test_unconfigured_provider_surfaces() {
        let (sampler, _) = demo();
        let path = TwoArcPath::new();
        assert!(sampler.samples(&path).next().unwrap().is_err());
    }
}
