use std::io::Cursor;
use std::sync::Arc;

use agrirecords::app_context::{AppContext, RecordPayload};
use agrirecords::auth::RequestSession;
use agrirecords::config::AppConfig;
use agrirecords::database::entities::{activity_logs, farmer_profiles};
use agrirecords::database::test_utils::setup_test_db;
use agrirecords::errors::CoreErrorKind;
use agrirecords::services::ListQuery;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

async fn seed_farmers(app: &AppContext) {
    for (reg_no, name, area) in [("RB-300", "Awang Ahmad", 1.5), ("RB-301", "Dayang Siti", 3.0)] {
        let input = json!({ "rocbnRegNo": reg_no, "farmerName": name, "farmArea": area });
        let serde_json::Value::Object(map) = input else {
            unreachable!()
        };
        app.create_record::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            RecordPayload::Plain(map),
        )
        .await
        .expect("Failed to create farmer");
    }
}

fn upload(rows: &[[&str; 3]]) -> String {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "ROCBN Reg. No").unwrap();
    worksheet.write_string(0, 1, "farmerName").unwrap();
    worksheet.write_string(0, 2, "Farm Area").unwrap();
    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        worksheet.write_string(r, 0, row[0]).unwrap();
        worksheet.write_string(r, 1, row[1]).unwrap();
        worksheet.write_string(r, 2, row[2]).unwrap();
    }
    STANDARD.encode(workbook.save_to_buffer().unwrap())
}

#[tokio::test]
async fn export_reads_back_with_calamine() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));
    seed_farmers(&app).await;

    let encoded = app
        .export_records::<farmer_profiles::Entity>(&RequestSession::Anonymous)
        .await
        .expect("export farmers");
    let bytes = STANDARD.decode(encoded).expect("base64 export");

    let mut xlsx: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open export");
    assert_eq!(xlsx.sheet_names(), vec!["farmer_profiles".to_string()]);
    let range = xlsx
        .worksheet_range("farmer_profiles")
        .expect("read sheet");

    assert_eq!(range.height(), 3);
    assert_eq!(
        range.get((0, 0)),
        Some(&Data::String("ROCBN Reg. No".to_string()))
    );

    let mut reg_nos: Vec<String> = (1..range.height())
        .filter_map(|row| match range.get((row, 0)) {
            Some(Data::String(value)) => Some(value.clone()),
            _ => None,
        })
        .collect();
    reg_nos.sort();
    assert_eq!(reg_nos, vec!["RB-300", "RB-301"]);
}

#[tokio::test]
async fn export_dir_receives_one_file_per_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = AppConfig {
        export_dir: Some(dir.path().join("exports")),
        ..AppConfig::default()
    };
    let app = AppContext::new(setup_test_db().await, Arc::new(config));
    seed_farmers(&app).await;

    for _ in 0..2 {
        app.export_records::<farmer_profiles::Entity>(&RequestSession::Anonymous)
            .await
            .expect("export farmers");
    }

    let path = dir.path().join("exports").join("farmer_profiles.xlsx");
    let written = std::fs::read(&path).expect("export file written");
    let mut xlsx: Xlsx<_> = open_workbook_from_rs(Cursor::new(written)).expect("open file");
    let range = xlsx
        .worksheet_range("farmer_profiles")
        .expect("read sheet");
    assert_eq!(range.height(), 3);

    let entries = std::fs::read_dir(dir.path().join("exports"))
        .expect("list exports")
        .count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn import_creates_every_row() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));

    let summary = app
        .import_records::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            &upload(&[
                ["RB-400", "Awang Ahmad", "2.25"],
                ["RB-401", "Dayang Siti", ""],
            ]),
        )
        .await
        .expect("import farmers");
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.uuids.len(), 2);

    let farmers = app
        .list_records::<farmer_profiles::Entity>(&RequestSession::Anonymous, &ListQuery::default())
        .await
        .expect("list farmers");
    assert_eq!(farmers.len(), 2);
    let awang = farmers
        .iter()
        .find(|farmer| farmer.rocbn_reg_no == "RB-400")
        .expect("imported farmer");
    assert_eq!(awang.farm_area, 2.25);

    let imports = activity_logs::Entity::find()
        .filter(activity_logs::Column::Action.eq("IMPORT"))
        .count(app.db())
        .await
        .expect("count import entries");
    assert_eq!(imports, 2);
}

#[tokio::test]
async fn import_is_all_or_nothing() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));

    let err = app
        .import_records::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            &upload(&[
                ["RB-500", "Awang Ahmad", "1"],
                ["RB-501", "", "1"],
            ]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);
    assert_eq!(
        err.fields().and_then(|fields| fields.get("row")).map(String::as_str),
        Some("3")
    );

    // Duplicate inside the file fails in the store, after the first insert.
    let err = app
        .import_records::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            &upload(&[
                ["RB-510", "Awang Ahmad", "1"],
                ["RB-510", "Dayang Siti", "1"],
            ]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Duplicate ROCBN Reg. No");

    let rows = farmer_profiles::Entity::find()
        .count(app.db())
        .await
        .expect("count farmers");
    assert_eq!(rows, 0);
    let logs = activity_logs::Entity::find()
        .count(app.db())
        .await
        .expect("count logs");
    assert_eq!(logs, 0);
}

#[tokio::test]
async fn import_rejects_unreadable_files() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));

    let err = app
        .import_records::<farmer_profiles::Entity>(&RequestSession::Anonymous, "not base64!!")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);
}

#[tokio::test]
async fn numeric_cells_in_text_columns_import_without_decimals() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in ["ROCBN Reg. No", "farmerName", "IC No", "phone"].into_iter().enumerate() {
        worksheet.write_string(0, col as u16, header).unwrap();
    }
    worksheet.write_string(1, 0, "RB-600").unwrap();
    worksheet.write_string(1, 1, "Awang Ahmad").unwrap();
    worksheet.write_number(1, 2, 1234567.0).unwrap();
    worksheet.write_number(1, 3, 8881234.0).unwrap();
    let encoded = STANDARD.encode(workbook.save_to_buffer().unwrap());

    app.import_records::<farmer_profiles::Entity>(&RequestSession::Anonymous, &encoded)
        .await
        .expect("import farmers");

    let farmer = farmer_profiles::Entity::find()
        .filter(farmer_profiles::Column::RocbnRegNo.eq("RB-600"))
        .one(app.db())
        .await
        .expect("query farmer")
        .expect("imported farmer");
    assert_eq!(farmer.phone, "8881234");
    assert_eq!(farmer.ic_no, "1234567");
}
