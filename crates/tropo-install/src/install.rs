//! Library installation with the bootstrap's easy_install.

use tracing::info;

use tropo_platform::OutputSink;

use crate::data::StagedEnvironment;
use crate::effects::ScriptRunner;
use crate::error::InstallError;
use crate::launcher::Launcher;

/// Run easy_install once for all `libraries`. Nothing is launched for an
/// empty list.
pub async fn install_libraries<R: ScriptRunner>(
    env: &StagedEnvironment,
    launcher: &Launcher,
    libraries: &[String],
    runner: &R,
) -> Result<(), InstallError> {
    if libraries.is_empty() {
        info!("no python libraries requested");
        return Ok(());
    }

    info!(?libraries, "installing requested python libraries");
    let invocation = launcher.invocation(
        env,
        &env.easy_install_script(),
        libraries,
        OutputSink::Inherit,
    )?;
    runner
        .run(invocation)
        .await
        .map_err(|source| InstallError::Process {
            libraries: libraries.to_vec(),
            source,
        })?;
    info!("installing requested python libraries done");

    Ok(())
}
