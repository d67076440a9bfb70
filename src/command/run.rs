use anyhow::{Context, Result};

use crate::ai::{ClientConfig, OpenAiClient};
use crate::cli::RunArgs;
use crate::context::RunContext;
use crate::locales;
use crate::pipeline::Pipeline;

pub async fn run_pipeline(args: RunArgs) -> Result<()> {
    let root = std::env::current_dir().context("failed to resolve working directory")?;

    let ctx = RunContext {
        framework: args.framework,
        builder: args.builder,
        builder_config_file: args.builder_config,
        main_file: args.main_file,
        glob: args.glob,
        checkpoint_file: args.checkpoint_file,
        default_locale: locales::resolve(&args.default_locale),
        locales: args.locales.iter().map(|code| locales::resolve(code)).collect(),
        need_install: !args.skip_install,
        need_builder_config: !args.skip_builder_config,
        need_main_config: !args.skip_main_config,
    };

    let config = ClientConfig::resolve(args.model)?;
    let generator = OpenAiClient::new(config)?;

    let mut pipeline = Pipeline::new(ctx, root, &generator)?;
    pipeline.run().await
}
