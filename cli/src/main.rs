mod render;

use clap::{Parser, Subcommand};
use orthoroute_common::util::config::Config;
use orthoroute_common::util::scene::Scene;
use orthoroute_common::util::{generator, logger};
use orthoroute_router::{Router, check};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a scene and print a report.
    Route {
        scene: PathBuf,
        /// Also render the result to this PNG file.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Route a scene and verify the result.
    Check { scene: PathBuf },
    /// Write a random scene.
    Generate {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 16)]
        components: usize,
        #[arg(long, default_value_t = 32)]
        connections: usize,
        #[arg(long, default_value = "scenes/random.toml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config: Config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    match args.command {
        Commands::Route { scene, image } => {
            let router = run_routing(&scene, &config)?;
            print_report(&router);
            if let Some(path) = image {
                prepare_output_dir(&path)?;
                render::draw_routing(&router, &path, &config.render)?;
            }
        }
        Commands::Check { scene } => {
            let router = run_routing(&scene, &config)?;
            if let Err(violations) = check::run(&router) {
                eprintln!("{} violation(s) found", violations.len());
                std::process::exit(1);
            }
        }
        Commands::Generate {
            seed,
            components,
            connections,
            output,
        } => {
            prepare_output_dir(&output)?;
            let scene = generator::generate_scene(seed, components, connections);
            let text = toml::to_string(&scene)
                .map_err(|e| anyhow::anyhow!("Failed to serialise scene: {}", e))?;
            std::fs::write(&output, text)?;
            log::info!("Generated: {:?}", output);
        }
    }

    Ok(())
}

fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    if !path.exists() {
        return Err(anyhow::anyhow!("Scene file missing: {:?}", path));
    }
    log::info!("Parsing scene: {:?}", path);
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| anyhow::anyhow!("Invalid scene in {:?}: {}", path, e))
}

fn prepare_output_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_routing(path: &Path, config: &Config) -> anyhow::Result<Router> {
    let scene = load_scene(path)?;
    if let Some(b) = scene.bounds() {
        log::info!(
            "Scene spans ({:.2}, {:.2}) to ({:.2}, {:.2})",
            b.min.x,
            b.min.y,
            b.max.x,
            b.max.y
        );
    }
    let mut router = Router::new(config.router.clone());
    for rect in scene.rects() {
        router.add_obstacle(rect);
    }
    for (source, target) in scene.endpoints() {
        router.add_connection(source, target);
    }
    router.route().map_err(|e| anyhow::anyhow!(e))?;
    Ok(router)
}

fn print_report(router: &Router) {
    let registry = router.coordinates_registry();
    println!(
        "grid {}x{}, {} obstacles",
        registry.x_coordinates().len(),
        registry.y_coordinates().len(),
        router.obstacles().blocked().len()
    );
    for (i, route) in router.routing_result().iter().enumerate() {
        let points: Vec<String> = route.points().iter().map(|p| p.to_string()).collect();
        let status = if route.is_route_found() {
            "ok"
        } else {
            "UNROUTED"
        };
        println!(
            "#{:<4} {:<8} len {:>8.2} bends {:>2}  {}",
            i,
            status,
            route.length(),
            route.bends(),
            points.join(" -> ")
        );
    }
    let stats = router.stats();
    println!(
        "found {}, failed {}, wire length {:.2}, bends {}",
        stats.found, stats.failed, stats.wire_length, stats.bends
    );
}
