use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use voxel_hull::dataset::{self, IntersectionDataset};
use voxel_hull::{ColourMode, HullConfig};

/// 多相机体素求交后处理
#[derive(Debug, Parser)]
#[command(name = "voxel-hull", version, about)]
struct Args {
    /// 输入数据集 (JSON: voxels / pixel_values / bounds)
    #[arg(short, long)]
    input: PathBuf,

    /// 输出文件 (JSON: voxels / colours / bounds)
    #[arg(short, long)]
    output: PathBuf,

    /// 配置文件 (JSON), 命令行参数优先
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    block_size: Option<f64>,

    #[arg(long, value_enum)]
    colour_mode: Option<ColourModeArg>,

    /// 随机上色种子
    #[arg(long)]
    seed: Option<u64>,

    /// 额外导出紧凑二进制
    #[arg(long)]
    packed: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColourModeArg {
    Sampled,
    Averaged,
    Randomised,
}

impl From<ColourModeArg> for ColourMode {
    fn from(arg: ColourModeArg) -> Self {
        match arg {
            ColourModeArg::Sampled => ColourMode::Sampled,
            ColourModeArg::Averaged => ColourMode::Averaged,
            ColourModeArg::Randomised => ColourMode::Randomised,
        }
    }
}

impl Args {
    /// 默认值 < 配置文件 < 命令行
    fn resolve_config(&self) -> Result<HullConfig> {
        let mut config = match &self.config {
            Some(path) => HullConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => HullConfig::default(),
        };
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(mode) = self.colour_mode {
            config.colour_mode = mode.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    let data = dataset::load_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset: {}", args.input.display()))?;
    tracing::info!(
        frames = data.num_frames(),
        stepsize = data.bounds.stepsize,
        block_size = config.block_size,
        mode = ?config.colour_mode,
        "dataset loaded"
    );

    let intersector = config.intersector(data.bounds.stepsize)?;
    let bounds = data.bounds.clone();
    let frames = data.into_frames()?;
    let results = intersector.process_frames(&frames, config.seed)?;

    let out = IntersectionDataset::from_results(&results, bounds);
    dataset::save_intersection(&args.output, &out)
        .with_context(|| format!("Failed to write result: {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), "intersection saved");

    if let Some(path) = &args.packed {
        dataset::write_packed(path, &results)
            .with_context(|| format!("Failed to write packed result: {}", path.display()))?;
        tracing::info!(path = %path.display(), "packed voxels saved");
    }
    Ok(())
}
