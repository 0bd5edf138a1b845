use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{info, Level};

use zcull::mesh::{Mesh, MeshSource, ObjMesh};
use zcull::render::{CullMode, ShadingMode};
use zcull::{Engine, SceneConfig};

#[derive(Parser, Debug)]
#[command(name = "zcull", version, about = "Render a triangle mesh to PNG on the CPU")]
struct Cli {
    /// OBJ model to render. Falls back to the config's model, then a unit cube.
    model: Option<PathBuf>,

    /// Scene configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path for the color buffer.
    #[arg(long, default_value = "frame.png")]
    out: PathBuf,

    /// Also write a grayscale depth image.
    #[arg(long)]
    depth_out: Option<PathBuf>,

    /// Depth image mapping: `normalized` stretches the covered depth range
    /// (nearest white), `raw` writes `255 - depth` clamped to [0, 255].
    #[arg(long, value_enum, default_value_t = DepthView::Normalized)]
    depth_view: DepthView,

    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    height: Option<u16>,

    #[arg(long, value_enum)]
    cull: Option<CullArg>,

    #[arg(long, value_enum)]
    shading: Option<ShadingArg>,

    /// Skip the wireframe overlay.
    #[arg(long, default_value_t = false)]
    no_wireframe: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CullArg {
    None,
    Front,
    Back,
}

impl From<CullArg> for CullMode {
    fn from(arg: CullArg) -> Self {
        match arg {
            CullArg::None => CullMode::None,
            CullArg::Front => CullMode::Front,
            CullArg::Back => CullMode::Back,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DepthView {
    Normalized,
    Raw,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ShadingArg {
    Barycentric,
    Flat,
}

impl From<ShadingArg> for ShadingMode {
    fn from(arg: ShadingArg) -> Self {
        match arg {
            ShadingArg::Barycentric => ShadingMode::Barycentric,
            ShadingArg::Flat => ShadingMode::Flat,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("read config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    apply_overrides(&mut config, &cli);

    let engine = Engine::from_config(&config).context("invalid scene configuration")?;

    let frame = match cli.model.as_ref().or(config.model.as_ref()) {
        Some(path) => {
            let mut mesh = ObjMesh::open(path);
            mesh.parse()
                .with_context(|| format!("load model {}", path.display()))?;
            engine.render(&mesh)
        }
        None => engine.render(&Mesh::cube()),
    };

    frame
        .target
        .color()
        .save(&cli.out)
        .with_context(|| format!("write {}", cli.out.display()))?;
    info!(
        path = %cli.out.display(),
        triangles = frame.stats.triangles,
        rasterized = frame.stats.rasterized,
        "wrote color buffer"
    );

    if let Some(depth_out) = &cli.depth_out {
        let depth_image = match cli.depth_view {
            DepthView::Normalized => frame.target.visualize_depth_normalized(),
            DepthView::Raw => frame.target.visualize_depth(),
        };
        depth_image
            .save(depth_out)
            .with_context(|| format!("write {}", depth_out.display()))?;
        info!(path = %depth_out.display(), view = ?cli.depth_view, "wrote depth buffer");
    }

    Ok(())
}

fn apply_overrides(config: &mut SceneConfig, cli: &Cli) {
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(cull) = cli.cull {
        config.cull_mode = cull.into();
    }
    if let Some(shading) = cli.shading {
        config.shading = shading.into();
    }
    if cli.no_wireframe {
        config.wireframe = false;
    }
}
