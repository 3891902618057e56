//! Frame-stepped maneuver loop
//!
//! The loop is driven from outside, one [`tick`](Maneuver::tick) per frame of
//! whatever clock the host runs (GUI event loop, headless harness, exporter).
//!
//! ```text
//! Idle --tick--> Running{0} --...--> Running{n-1} --> Completed
//!                    ^                                    | repeat
//!                    +------------ Restarting{delay} <----+
//! ```

use crate::config::{AnimationConfig, ManeuverConfig};
use crate::error::Result;
use crate::geometry::{GeometryConfig, PathParameters, TravelRange};
use crate::path::{self, PathProvider, PathSampler};
use crate::pose::{PoseUpdate, PoseUpdater, VehiclePose};
use crate::scene::SceneLayout;

/// Where the loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed or reset, no frame consumed yet
    Idle,
    /// Next frame to emit
    Running { next_frame: u32 },
    /// All frames emitted
    Completed,
    /// Waiting out the repeat delay
    Restarting { remaining_ticks: u32 },
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Frame(PoseUpdate),
    /// The run has finished; repeated every tick unless the loop repeats
    Completed,
    Waiting { remaining_ticks: u32 },
}

/// A parking maneuver driven by an owned [`PathProvider`]
pub struct Maneuver<P: PathProvider> {
    geometry: GeometryConfig,
    params: PathParameters,
    travel: TravelRange,
    sampler: PathSampler,
    updater: PoseUpdater,
    animation: AnimationConfig,
    delay_ticks: u32,
    overhang_frames: u32,
    provider: P,
    state: LoopState,
    pose: VehiclePose,
    scene: SceneLayout,
}

impl Maneuver<Box<dyn PathProvider>> {
    /// Build the maneuver together with the provider named in `config`.
    pub fn from_config(config: &ManeuverConfig) -> Result<Self> {
        // Validate before binding anything external
        GeometryConfig::normalize(&config.geometry, config.scale)?;
        let provider = path::load_provider(&config.provider)?;
        Self::new(config, provider)
    }
}

impl<P: PathProvider> Maneuver<P> {
    /// Normalize the geometry, configure `provider` and lay out the scene.
    ///
    /// Invalid geometry is rejected before the provider is touched.
    pub fn new(config: &ManeuverConfig, mut provider: P) -> Result<Self> {
        let geometry = GeometryConfig::normalize(&config.geometry, config.scale)?;
        let travel = TravelRange::from_radius(config.turning_radius, geometry.scale)?;
        let params = PathParameters::derive(&geometry, config.turning_radius)?;
        let delay_ticks = config.animation.delay_ticks()?;

        path::configure(&mut provider, &params);

        let overhang_frames = travel.frames_past(params.slot_center());
        if overhang_frames > 0 {
            tracing::warn!(
                overhang_frames,
                slot_center = params.slot_center(),
                frames = travel.frame_count(),
                "travel range extends past the slot center"
            );
        }

        let sampler = PathSampler::new(&travel);
        let scene = SceneLayout::build(&geometry, &sampler, &provider)?;
        let updater = PoseUpdater::new(&geometry, config.animation.first_frame_heading);

        tracing::info!(
            provider = provider.name(),
            frames = travel.frame_count(),
            primary = params.primary,
            offset = params.offset,
            "maneuver ready"
        );

        Ok(Self {
            geometry,
            params,
            travel,
            sampler,
            updater,
            animation: config.animation,
            delay_ticks,
            overhang_frames,
            provider,
            state: LoopState::Idle,
            pose: VehiclePose::rest(&geometry),
            scene,
        })
    }

    /// Advance by one frame of the host clock.
    pub fn tick(&mut self) -> Result<Tick> {
        match self.state {
            LoopState::Idle => self.begin(),
            LoopState::Running { next_frame } => self.step(next_frame),
            LoopState::Completed => {
                if self.animation.repeat {
                    // This tick is the first of the delay
                    self.state = LoopState::Restarting {
                        remaining_ticks: self.delay_ticks.saturating_sub(1),
                    };
                    self.pose = VehiclePose::rest(&self.geometry);
                }
                Ok(Tick::Completed)
            }
            LoopState::Restarting { remaining_ticks: 0 } => {
                tracing::info!("restarting maneuver");
                self.scene = SceneLayout::build(&self.geometry, &self.sampler, &self.provider)?;
                self.begin()
            }
            LoopState::Restarting { remaining_ticks } => {
                let remaining_ticks = remaining_ticks - 1;
                self.state = LoopState::Restarting { remaining_ticks };
                Ok(Tick::Waiting { remaining_ticks })
            }
        }
    }

    /// Go back to [`LoopState::Idle`] with the vehicle at rest.
    pub fn reset(&mut self) {
        self.state = LoopState::Idle;
        self.pose = VehiclePose::rest(&self.geometry);
    }

    /// Tick until the current run completes and collect its frames.
    ///
    /// Starts from wherever the loop is; call [`reset`](Self::reset) first
    /// for a full run.
    pub fn run_to_completion(&mut self) -> Result<Vec<PoseUpdate>> {
        let mut frames = Vec::with_capacity(self.travel.frame_count() as usize);
        loop {
            match self.tick()? {
                Tick::Frame(update) => frames.push(update),
                Tick::Completed => return Ok(frames),
                Tick::Waiting { .. } => {}
            }
        }
    }

    fn begin(&mut self) -> Result<Tick> {
        self.pose = self.updater.initial_pose(&self.provider)?;
        tracing::info!(frames = self.travel.frame_count(), "maneuver started");
        self.step(0)
    }

    fn step(&mut self, frame: u32) -> Result<Tick> {
        let update = self.updater.update(&self.provider, frame, &self.pose)?;
        self.pose = update.pose;

        let next_frame = frame + 1;
        self.state = if next_frame < self.travel.frame_count() {
            LoopState::Running { next_frame }
        } else {
            tracing::info!(frames = next_frame, "maneuver completed");
            LoopState::Completed
        };

        tracing::trace!(
            frame,
            x = update.pose.position.x,
            y = update.pose.position.y,
            heading = update.pose.heading_degrees(),
            "frame"
        );
        Ok(Tick::Frame(update))
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Current vehicle pose
    pub fn pose(&self) -> &VehiclePose {
        &self.pose
    }

    pub fn scene(&self) -> &SceneLayout {
        &self.scene
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn params(&self) -> &PathParameters {
        &self.params
    }

    pub fn travel(&self) -> &TravelRange {
        &self.travel
    }

    pub fn frame_count(&self) -> u32 {
        self.travel.frame_count()
    }

    /// Frames whose axle lies laterally beyond the slot's center
    pub fn overhang_frames(&self) -> u32 {
        self.overhang_frames
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
