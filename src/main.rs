use anyhow::Context;
use wrp_kernel::settings::Settings;
use wrp_kernel::InitCtx;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    wrp_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        data_dir = %settings.storage.data_dir.display(),
        "willowrune-app starting"
    );

    let site = willowrune_app::establish_site(&settings)?;
    let registry = willowrune_app::build_registry(&settings)?;

    let ctx = InitCtx {
        settings: &settings,
        site: &site,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = wrp_http::start_server(&registry, &settings, site.clone()).await;

    registry.stop_all().await?;
    served
}
