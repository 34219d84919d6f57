// ==========================================
// HistoryApi 集成测试
// ==========================================
// 测试目标: 过滤条件组合、日期窗口、汇总统计、空态区分
// ==========================================


use chrono::{Duration, Utc};
use production_tracker::app::AppState;
use production_tracker::engine::{DateWindow, HistoryFilter};
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

#[test]
fn test_today_window_excludes_yesterday_and_sums_only_today() {
    let ctx = create_test_ctx();

    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "甲产品", None, None)
        .unwrap();
    let today_batch = ctx.state.batch_api.add_batch(&sku.sku_id, 50, None).unwrap();
    let old_batch = ctx.state.batch_api.add_batch(&sku.sku_id, 30, None).unwrap();
    test_helpers::backdate_batch(&ctx.db_path, &old_batch.batch_id, Utc::now() - Duration::days(1))
        .unwrap();

    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            date_window: DateWindow::Today,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(view.summary.total_batches, 1);
    assert_eq!(view.summary.total_pieces, 50);
    assert_eq!(view.batches[0].batch_id, today_batch.batch_id);
    assert!(!view.ledger_empty);
}

#[test]
fn test_seven_and_thirty_day_windows() {
    let ctx = create_test_ctx();

    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "甲产品", None, None)
        .unwrap();
    let recent = ctx.state.batch_api.add_batch(&sku.sku_id, 10, None).unwrap();
    let mid = ctx.state.batch_api.add_batch(&sku.sku_id, 20, None).unwrap();
    let old = ctx.state.batch_api.add_batch(&sku.sku_id, 30, None).unwrap();

    test_helpers::backdate_batch(&ctx.db_path, &recent.batch_id, Utc::now() - Duration::days(3))
        .unwrap();
    test_helpers::backdate_batch(&ctx.db_path, &mid.batch_id, Utc::now() - Duration::days(15))
        .unwrap();
    test_helpers::backdate_batch(&ctx.db_path, &old.batch_id, Utc::now() - Duration::days(45))
        .unwrap();

    let last7 = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            date_window: DateWindow::Last7Days,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(last7.summary.total_batches, 1);
    assert_eq!(last7.summary.total_pieces, 10);

    let last30 = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            date_window: DateWindow::Last30Days,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(last30.summary.total_batches, 2);
    assert_eq!(last30.summary.total_pieces, 30);

    let all = ctx
        .state
        .history_api
        .query(&HistoryFilter::default())
        .unwrap();
    assert_eq!(all.summary.total_batches, 3);
}

#[test]
fn test_search_and_sku_filter_compose() {
    let ctx = create_test_ctx();

    let sku_a = ctx
        .state
        .sku_api
        .add_sku("ABC123", "Widget", None, None)
        .unwrap();
    let sku_b = ctx
        .state
        .sku_api
        .add_sku("XYZ789", "Gadget", None, None)
        .unwrap();
    ctx.state.batch_api.add_batch(&sku_a.sku_id, 10, None).unwrap();
    ctx.state.batch_api.add_batch(&sku_b.sku_id, 20, None).unwrap();

    // 文本搜索: 编码子串，大小写不敏感
    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            search: Some("abc".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(view.summary.total_batches, 1);
    assert_eq!(view.batches[0].sku_code, "ABC123");

    // 文本搜索: 产品名称子串
    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            search: Some("gadg".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(view.summary.total_batches, 1);

    // 精确 SKU + 不匹配的文本 → 空结果
    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            search: Some("widget".to_string()),
            sku_id: Some(sku_b.sku_id.clone()),
            date_window: DateWindow::All,
        })
        .unwrap();
    assert_eq!(view.summary.total_batches, 0);
    assert!(!view.ledger_empty);
}

#[test]
fn test_worked_aggregate_example() {
    // SKU=ABC，两个批次 50+30 件 → totalBatches=2, totalPieces=80, uniqueSKUs=1
    let ctx = create_test_ctx();

    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "甲产品", None, None)
        .unwrap();
    let b1 = ctx.state.batch_api.add_batch(&sku.sku_id, 50, None).unwrap();
    let b2 = ctx.state.batch_api.add_batch(&sku.sku_id, 30, None).unwrap();
    assert_eq!(b1.batch_number, "001");
    assert_eq!(b2.batch_number, "002");

    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            sku_id: Some(sku.sku_id.clone()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(view.summary.total_batches, 2);
    assert_eq!(view.summary.total_pieces, 80);
    assert_eq!(view.summary.unique_skus, 1);
}

#[test]
fn test_empty_states_are_distinguished() {
    let ctx = create_test_ctx();

    // 账本完全为空
    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter::default())
        .unwrap();
    assert!(view.ledger_empty);
    assert_eq!(view.summary.total_batches, 0);

    // 有批次但过滤后为空
    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "甲产品", None, None)
        .unwrap();
    ctx.state.batch_api.add_batch(&sku.sku_id, 10, None).unwrap();

    let view = ctx
        .state
        .history_api
        .query(&HistoryFilter {
            search: Some("不存在的关键字".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(!view.ledger_empty);
    assert_eq!(view.summary.total_batches, 0);
}

#[test]
fn test_production_totals() {
    let ctx = create_test_ctx();

    let sku = ctx
        .state
        .sku_api
        .add_sku("ABC", "甲产品", None, None)
        .unwrap();
    ctx.state.batch_api.add_batch(&sku.sku_id, 40, None).unwrap();
    let old = ctx.state.batch_api.add_batch(&sku.sku_id, 60, None).unwrap();
    test_helpers::backdate_batch(&ctx.db_path, &old.batch_id, Utc::now() - Duration::days(2))
        .unwrap();

    let totals = ctx.state.history_api.production_totals().unwrap();
    assert_eq!(totals.total_pieces, 100);
    assert_eq!(totals.today_pieces, 40);
}
