use crate::cli::IndexArgs;
use anyhow::Context;
use driftlog_graph::{CodeEntity, SemanticIndexer};
use log::info;
use std::fs;
use std::io::Write;

/// Build the entity described by the arguments, reading `--code-file` if given.
pub fn entity_from_args(args: &IndexArgs) -> anyhow::Result<CodeEntity> {
    let code = match (&args.code, &args.code_file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("either --code or --code-file is required"),
    };
    Ok(CodeEntity::new(
        &args.file,
        &args.kind,
        &args.name,
        code,
        &args.purpose,
    ))
}

/// Index one entity; with `check`, remove it again as a connection test.
pub async fn run(
    indexer: &dyn SemanticIndexer,
    entity: &CodeEntity,
    check: bool,
    out: &mut (dyn Write + Send),
) -> anyhow::Result<()> {
    indexer
        .index_entity(entity)
        .await
        .with_context(|| format!("failed to index {}", entity.name))?;
    writeln!(
        out,
        "Indexed {} {} from {}",
        entity.entity_type, entity.name, entity.file_path
    )?;
    if check {
        let removed = indexer
            .remove_entity(&entity.name)
            .await
            .with_context(|| format!("failed to remove {}", entity.name))?;
        info!("graph connection check passed (removed={removed})");
        writeln!(out, "Connection check passed; removed {removed} test node(s)")?;
    }
    Ok(())
}
