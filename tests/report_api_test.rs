// ==========================================
// AccessGate / ReportApi 集成测试
// ==========================================
// 测试目标: 口令门禁、报表导出（内容/合计行/文件名）、无数据拒绝导出
// ==========================================


use chrono::{Duration, Utc};
use production_tracker::api::{AdminToken, ApiError};
use production_tracker::app::AppState;
use production_tracker::logging;

struct TestCtx {
    _tmp: tempfile::NamedTempFile,
    db_path: String,
    state: AppState,
}

fn create_test_ctx() -> TestCtx {
    logging::init_test();
    let (tmp, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let state = AppState::new(db_path.clone()).expect("Failed to create AppState");
    TestCtx {
        _tmp: tmp,
        db_path,
        state,
    }
}

fn admin_token(ctx: &TestCtx) -> AdminToken {
    // 默认口令见 ConfigManager
    ctx.state
        .access_gate
        .authenticate("admin123")
        .expect("默认口令应该通过")
}

#[test]
fn test_access_gate_rejects_wrong_secret() {
    let ctx = create_test_ctx();

    let result = ctx.state.access_gate.authenticate("wrong-password");
    assert!(matches!(result, Err(ApiError::AccessDenied(_))));

    // 正确口令签发令牌
    let token = admin_token(&ctx);
    assert!(!token.token_id().is_empty());
}

#[test]
fn test_access_gate_secret_is_configurable() {
    let ctx = create_test_ctx();

    test_helpers::set_config(&ctx.db_path, "admin_access_secret", "s3cret").unwrap();

    assert!(ctx.state.access_gate.authenticate("admin123").is_err());
    assert!(ctx.state.access_gate.authenticate("s3cret").is_ok());
}

#[test]
fn test_export_writes_csv_with_totals_row() {
    let ctx = create_test_ctx();
    let token = admin_token(&ctx);

    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "Widget", None, None)
        .unwrap();
    ctx.state.batch_api.add_batch(&sku.sku_id, 50, None).unwrap();
    ctx.state.batch_api.add_batch(&sku.sku_id, 30, None).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let today = Utc::now().date_naive();
    let report = ctx
        .state
        .report_api
        .export(&token, today, None, out_dir.path())
        .expect("导出应该成功");

    assert_eq!(report.summary.total_batches, 2);
    assert_eq!(report.summary.total_pieces, 80);
    assert!(report.path.exists());

    // 文件名编码日期与 SKU 过滤条件
    assert_eq!(
        report.file_name,
        format!("Production-Report_{}_All-SKUs.csv", today.format("%d-%m-%Y"))
    );

    let content = std::fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // 表头 + 2 行批次 + 合计行
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Sr. No.,Date,Time,SKU Code,Product Name,Batch Number"));
    // 批次按时间正序: 001 在前
    assert!(lines[1].contains(",001,"));
    assert!(lines[2].contains(",002,"));
    // 合计行
    assert!(lines[3].contains("TOTAL"));
    assert!(lines[3].ends_with("80"));
}

#[test]
fn test_export_filters_by_sku_and_encodes_code_in_filename() {
    let ctx = create_test_ctx();
    let token = admin_token(&ctx);

    let sku_a = ctx
        .state
        .sku_api
        .add_sku("ABC", "Widget", None, None)
        .unwrap();
    let sku_b = ctx
        .state
        .sku_api
        .add_sku("XYZ", "Gadget", None, None)
        .unwrap();
    ctx.state.batch_api.add_batch(&sku_a.sku_id, 10, None).unwrap();
    ctx.state.batch_api.add_batch(&sku_b.sku_id, 20, None).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let today = Utc::now().date_naive();
    let report = ctx
        .state
        .report_api
        .export(&token, today, Some(&sku_b.sku_id), out_dir.path())
        .unwrap();

    assert_eq!(report.summary.total_batches, 1);
    assert_eq!(report.summary.total_pieces, 20);
    assert_eq!(
        report.file_name,
        format!("Production-Report_{}_XYZ.csv", today.format("%d-%m-%Y"))
    );

    let content = std::fs::read_to_string(&report.path).unwrap();
    assert!(content.contains("Gadget"));
    assert!(!content.contains("Widget"));
}

#[test]
fn test_export_rejects_empty_result() {
    let ctx = create_test_ctx();
    let token = admin_token(&ctx);

    // 只有昨天的批次，导出今天 → 无数据
    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "Widget", None, None)
        .unwrap();
    let old = ctx.state.batch_api.add_batch(&sku.sku_id, 10, None).unwrap();
    test_helpers::backdate_batch(&ctx.db_path, &old.batch_id, Utc::now() - Duration::days(1))
        .unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let today = Utc::now().date_naive();
    let result = ctx
        .state
        .report_api
        .export(&token, today, None, out_dir.path());
    assert!(matches!(result, Err(ApiError::NoData(_))));

    // 目录中没有生成任何文件
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);

    // 预览汇总依然是合法的空结果
    let summary = ctx.state.report_api.daily_summary(today, None).unwrap();
    assert_eq!(summary.total_batches, 0);
    assert_eq!(summary.total_pieces, 0);
}

#[test]
fn test_daily_summary_matches_export_summary() {
    let ctx = create_test_ctx();
    let token = admin_token(&ctx);

    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "Widget", None, None)
        .unwrap();
    ctx.state.batch_api.add_batch(&sku.sku_id, 25, None).unwrap();
    ctx.state.batch_api.add_batch(&sku.sku_id, 75, None).unwrap();

    let today = Utc::now().date_naive();
    let summary = ctx.state.report_api.daily_summary(today, None).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let report = ctx
        .state
        .report_api
        .export(&token, today, None, out_dir.path())
        .unwrap();

    assert_eq!(summary, report.summary);
}
