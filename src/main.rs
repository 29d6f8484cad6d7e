use clap::Parser;
use finreq::config::{self, load_draft};
use finreq::utils::logger;
use finreq::{
    load_reference_data, CliConfig, FormController, HttpReferenceSource, HttpSubmissionClient,
    SubmissionOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting finreq CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證端點設定
    if let Err(e) = config::validate_endpoints(&cli) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 載入參考資料（國家與貨幣目錄）
    let source = HttpReferenceSource::new(&cli.countries_endpoint, &cli.currencies_endpoint);
    let reference = load_reference_data(&source).await;
    if reference.used_any_fallback() {
        eprintln!("⚠️ Some reference data could not be fetched; a static fallback list is in use.");
    }

    // 讀取請求檔並逐欄位餵入控制器，讓 OPEC 強制規則照常生效
    let draft = match load_draft(&cli.request) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::error!("❌ Could not read request file {}: {}", cli.request, e);
            eprintln!("❌ Could not read request file: {}", e);
            std::process::exit(1);
        }
    };

    let mut controller = FormController::new(reference);
    controller.set_name(&draft.name);
    controller.set_origin_country(&draft.origin_country);
    controller.set_project_code(&draft.project_code);
    controller.set_description(&draft.description);
    controller.set_amount(&draft.amount);
    controller.set_currency(&draft.currency);
    controller.set_start_date(&draft.start_date);
    controller.set_end_date(&draft.end_date);

    if !controller.is_valid() {
        eprintln!("❌ The financing request is not valid:");
        for (field, violation) in controller.errors() {
            eprintln!("   {}: {}", field, violation);
        }
        std::process::exit(2);
    }

    tracing::info!("✅ All validation rules passed");
    if !controller.currency_editable() {
        tracing::info!("💱 OPEC origin: currency was forced to USD");
    }

    if cli.dry_run {
        println!("✅ The financing request is valid (dry run, nothing submitted).");
        return Ok(());
    }

    // 送出
    let gateway = HttpSubmissionClient::new(&cli.submit_endpoint);
    match controller.submit(&gateway).await? {
        SubmissionOutcome::Accepted => {
            tracing::info!("✅ Financing request submitted successfully");
            println!("✅ Financing request submitted successfully!");
        }
        SubmissionOutcome::Rejected { kind, message } => {
            tracing::error!("❌ Submission rejected ({}): {}", kind, message);
            eprintln!("❌ {}", message);
            eprintln!("💡 Your entries were kept; fix the issue and resubmit.");
            std::process::exit(1);
        }
    }

    Ok(())
}
