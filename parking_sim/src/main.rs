#![warn(clippy::all, rust_2018_idioms)]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::{Parser, ValueEnum};
    use parking_algo::{FirstFrameHeading, Maneuver, ManeuverConfig, ProviderConfig};
    use parking_sim::App;

    /// Parallel-parking maneuver viewer
    #[derive(Parser, Debug)]
    #[command(name = "parking_sim")]
    #[command(about = "Animate a parallel-parking maneuver along a reference path", long_about = None)]
    #[command(version)]
    pub struct Cli {
        /// TOML file with maneuver parameters; the built-in demo is used otherwise
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Stop after one run instead of starting over
        #[arg(long)]
        no_repeat: bool,

        /// Bind the path from a shared library instead of the built-in curve
        #[arg(long, value_name = "LIB")]
        native: Option<PathBuf>,

        /// How the first frame's heading is obtained
        #[arg(long, value_enum)]
        first_frame_heading: Option<HeadingArg>,

        /// Print the pose of every frame of one run and exit
        #[arg(long)]
        headless: bool,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    pub enum HeadingArg {
        FromDefault,
        SeedFromPrecedingFrame,
        Suppress,
    }

    impl From<HeadingArg> for FirstFrameHeading {
        fn from(arg: HeadingArg) -> Self {
            match arg {
                HeadingArg::FromDefault => FirstFrameHeading::FromDefault,
                HeadingArg::SeedFromPrecedingFrame => FirstFrameHeading::SeedFromPrecedingFrame,
                HeadingArg::Suppress => FirstFrameHeading::Suppress,
            }
        }
    }

    impl Cli {
        /// Config file (or demo) with the command-line overrides applied
        pub fn maneuver_config(&self) -> Result<ManeuverConfig> {
            let mut config = match &self.config {
                Some(path) => ManeuverConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => ManeuverConfig::demo(),
            };
            if self.no_repeat {
                config.animation.repeat = false;
            }
            if let Some(library) = &self.native {
                config.provider = ProviderConfig::Native {
                    library: library.clone(),
                };
            }
            if let Some(policy) = self.first_frame_heading {
                config.animation.first_frame_heading = policy.into();
            }
            Ok(config)
        }
    }

    fn run_headless(config: &ManeuverConfig) -> Result<()> {
        let mut maneuver =
            Maneuver::from_config(config).context("failed to build maneuver")?;
        let frames = maneuver.run_to_completion()?;
        println!("frame\tx\ty\theading_deg\taxle_x\taxle_y");
        for update in &frames {
            println!(
                "{}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}",
                update.frame,
                update.pose.position.x,
                update.pose.position.y,
                update.pose.heading_degrees(),
                update.axle.x,
                update.axle.y,
            );
        }
        tracing::info!(frames = frames.len(), "headless run finished");
        Ok(())
    }

    pub fn run() -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();

        let cli = Cli::parse();
        let config = cli.maneuver_config()?;

        if cli.headless {
            return run_headless(&config);
        }

        let native_options = eframe::NativeOptions::default();
        eframe::run_native(
            "Parking Simulator",
            native_options,
            Box::new(|cc| Ok(Box::new(App::new(cc, config)))),
        )
        .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_flags_override_config() {
            let cli = Cli::parse_from([
                "parking_sim",
                "--no-repeat",
                "--native",
                "./libcustom.so",
                "--first-frame-heading",
                "suppress",
            ]);
            let config = cli.maneuver_config().unwrap();
            assert!(!config.animation.repeat);
            assert_eq!(
                config.provider,
                ProviderConfig::Native {
                    library: "./libcustom.so".into()
                }
            );
            assert_eq!(
                config.animation.first_frame_heading,
                FirstFrameHeading::Suppress
            );
        }

        #[test]
        fn test_defaults_to_demo() {
            let cli = Cli::parse_from(["parking_sim"]);
            assert_eq!(cli.maneuver_config().unwrap(), ManeuverConfig::demo());
        }

        #[test]
        fn test_missing_config_file() {
            let cli = Cli::parse_from(["parking_sim", "--config", "./no-such-config.toml"]);
            let err = cli.maneuver_config().unwrap_err();
            assert!(format!("{err:#}").contains("no-such-config.toml"));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

// The web build starts through `parking_sim::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
