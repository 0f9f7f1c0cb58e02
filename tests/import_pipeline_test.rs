// ==========================================
// Import Pipeline - End-to-End Tests
// ==========================================
// Full flow: spreadsheet file -> parse -> auto-map -> transform ->
// batch submit (mocked collaborator) -> complete session.
// ==========================================

use bulk_label_importer::{
    BatchContext, BatchExecutionEngine, CanonicalField, CreateOrderRequest, CreateOrderResponse,
    FileParser, HeuristicColumnMapper, ImportError, ImportStage, ImportSession, OrderService,
    OrderServiceError, StandardRowTransformer, UniversalFileParser,
};
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ==========================================
// Always-succeeding collaborator
// ==========================================
#[derive(Clone, Default)]
struct AcceptAllOrderService {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl OrderService for AcceptAllOrderService {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, OrderServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CreateOrderResponse {
            order: bulk_label_importer::batch::CreatedOrder {
                id: format!("ord-{}", n),
                tracking_number: format!("TRK{:06}-{}", n, request.reference1),
            },
            new_balance: Some(100.0 - n as f64),
        })
    }
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file
}

// ==========================================
// Tests
// ==========================================

#[tokio::test(start_paused = true)]
async fn test_csv_upload_to_completed_session() {
    let temp_file = write_csv(
        "Recipient Name,Street Address,City,State,Zip Code,Country,Order Number\n\
         Jo March,1 Main St,Austin,TX,78701,US,SO-100\n\
         Sam Lee,2 Oak Ave,Dallas,TX,75201,,\n\
         ,3 Elm Rd,,CA,90001,US,SO-102\n",
    );

    let mut session = ImportSession::new();

    // Upload -> Map
    let sheet = UniversalFileParser.parse(temp_file.path()).unwrap();
    session
        .accept_file("orders.csv", sheet, &HeuristicColumnMapper)
        .unwrap();
    assert_eq!(session.stage(), ImportStage::Map);
    assert_eq!(
        session.column_mapping().header_for(CanonicalField::ToName),
        Some("Recipient Name")
    );
    assert_eq!(
        session.column_mapping().header_for(CanonicalField::OrderId),
        Some("Order Number")
    );

    // Map -> Review
    session.begin_review(&StandardRowTransformer).unwrap();
    let items = session.mapped_items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].order_id, "SO-100");
    assert_eq!(items[1].to_country, "US"); // blank country defaulted
    assert_eq!(items[1].order_id, "BULK-2"); // blank reference synthesized
    assert_eq!(
        items[2].errors,
        vec!["Missing recipient name", "Missing city"]
    );

    // Review -> Processing -> Complete
    session.set_defaults("fa-1", "lt-1");
    let inputs = session.begin_processing().unwrap();
    assert_eq!(session.stage(), ImportStage::Processing);

    let service = AcceptAllOrderService::default();
    let engine = BatchExecutionEngine::new(service.clone());
    let result = engine
        .run(
            &inputs.items,
            &BatchContext {
                from_address_id: inputs.from_address_id,
                label_type_id: inputs.label_type_id,
                starting_balance: 100.0,
            },
        )
        .await;

    assert_eq!(result.successful.len(), 2);
    assert_eq!(result.failed.len(), 0);
    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.total(), 3);
    assert_eq!(service.calls.load(Ordering::SeqCst), 2);

    session.complete(result).unwrap();
    assert_eq!(session.stage(), ImportStage::Complete);
    let stored = session.batch_result().unwrap();
    assert!(stored.completed_at >= stored.started_at);
    assert!(stored.successful[0].tracking_number.contains("SO-100"));
}

#[tokio::test]
async fn test_xlsx_upload_parses_first_sheet() {
    let temp_file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let path = temp_file.path().to_path_buf();

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    let headers = ["Name", "Street", "City", "State", "Zip", "Country", "Weight"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    let row = ["Jo March", "1 Main St", "Austin", "TX", "78701", "US", "2.5"];
    for (col, value) in row.iter().enumerate() {
        worksheet.write_string(1, col as u16, *value).unwrap();
    }
    // A second sheet must be ignored.
    let second = workbook.add_worksheet();
    second.write_string(0, 0, "Ignored").unwrap();
    workbook.save(&path).unwrap();

    let sheet = UniversalFileParser.parse(&path).unwrap();

    assert_eq!(sheet.headers.len(), 7);
    assert_eq!(sheet.rows.len(), 1);
    assert_eq!(sheet.rows[0].get("Name"), Some(&"Jo March".to_string()));

    let mapping = {
        use bulk_label_importer::ColumnMapper;
        HeuristicColumnMapper.auto_map(&sheet.headers)
    };
    let items = {
        use bulk_label_importer::RowTransformer;
        StandardRowTransformer.transform(&sheet.rows, &mapping)
    };
    assert_eq!(items.len(), 1);
    assert!(items[0].is_submittable());
    assert_eq!(items[0].weight, 2.5);
}

#[test]
fn test_unsupported_extension_rejected_with_exact_message() {
    let result = UniversalFileParser.parse(Path::new("recipients.pdf"));

    match result {
        Err(err @ ImportError::UnsupportedFormat { .. }) => {
            assert_eq!(
                err.to_string(),
                "Unsupported file format. Please upload CSV, XLS, or XLSX files."
            );
        }
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_csv_with_only_blank_rows_is_no_data() {
    let temp_file = write_csv("Name,City\n,\n , \n");

    let result = UniversalFileParser.parse(temp_file.path());
    assert!(matches!(result, Err(ImportError::NoData)));
}
