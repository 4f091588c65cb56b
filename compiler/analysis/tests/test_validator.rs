use analysis::{CompilerDiagnostics, ModelValidator};
use ir::{
    LroPagedResponse, Method, ModelType, OperationKind, PageIterator, PollingHandle, ReturnType,
};
use registry::{get_or_register, ServiceDescription};
use serde_json::json;

/// Helper function to create a polling handle candidate
fn create_test_handle(name: &str, method: &str, list_all: bool) -> ModelType {
    ModelType::from(PollingHandle {
        name: name.into(),
        list_all,
        group: String::new(),
        method: method.into(),
        result: None,
    })
}

#[test]
fn accepts_consistent_model() {
    let mut service = ServiceDescription::new("widgets");
    let widget = service.register_type(ModelType::composite("Widget"));
    let (methods, types) = service.parts_mut();
    assert!(methods.is_empty());
    let pager = get_or_register(types, ModelType::from(PageIterator::new(widget, false)));
    let handle = get_or_register(types, create_test_handle("ListWidgets", "ListWidgets", false));
    let list_all =
        get_or_register(types, create_test_handle("ListWidgetsAll", "ListWidgets", true));

    service.insert_method(Method::new(
        "",
        "ListWidgets",
        OperationKind::PaginatedLongRunning,
        ReturnType::LroPaged(LroPagedResponse {
            handle,
            list_all_handle: list_all,
            pager,
            headers: None,
        }),
    ));

    let errors = ModelValidator::new().validate(&service);
    assert!(errors.is_empty(), "consistent model should validate, got: {:?}", errors);
    assert!(!CompilerDiagnostics::collect(&service).has_errors());
}

#[test]
fn fails_on_dangling_reference() {
    let mut service = ServiceDescription::new("widgets");
    service.insert_method(Method::new(
        "widgets",
        "Get",
        OperationKind::Plain,
        ReturnType::response(Some(ir::TypeId::new(7)), None),
    ));

    let errors = ModelValidator::new().validate(&service);
    assert_eq!(errors, vec!["Method `widgets.Get` references unregistered type #7".to_string()]);
}

#[test]
fn fails_on_duplicate_method_identity() {
    let service = ServiceDescription::from_json_str(
        &json!({
            "name": "widgets",
            "methods": [
                { "group": "widgets", "name": "Get" },
                { "group": "widgets", "name": "Get" },
                { "group": "gadgets", "name": "Get" }
            ]
        })
        .to_string(),
    )
    .expect("valid model JSON");

    let errors = ModelValidator::new().validate(&service);
    assert_eq!(errors, vec!["Duplicate method: widgets.Get".to_string()]);
}

#[test]
fn fails_on_wrong_wrapper_kinds() {
    let service = ServiceDescription::from_json_str(
        &json!({
            "name": "widgets",
            "types": [
                { "kind": "composite", "name": "Widget" },
                { "kind": "polling_handle", "name": "ListWidgets", "group": "", "method": "ListWidgets" }
            ],
            "methods": [{
                "name": "ListWidgets",
                "kind": "paginated_long_running",
                "return_type": { "shape": "lro_paged", "handle": 1, "list_all_handle": 1, "pager": 0 }
            }]
        })
        .to_string(),
    )
    .expect("valid model JSON");

    let errors = ModelValidator::new().validate(&service);
    assert_eq!(errors.len(), 2, "got: {:?}", errors);
    assert!(errors[0].contains("wrong list-all marker"));
    assert!(errors[1].contains("is a composite, not a page iterator"));
}

#[test]
fn fails_on_iterator_over_unregistered_element() {
    let service = ServiceDescription::from_json_str(
        &json!({
            "name": "widgets",
            "types": [{
                "kind": "page_iterator",
                "element": 4,
                "page": { "element": 4 }
            }]
        })
        .to_string(),
    )
    .expect("valid model JSON");

    let errors = ModelValidator::new().validate(&service);
    assert_eq!(errors, vec!["Page iterator #0 pages over unregistered type #4".to_string()]);
}

#[test]
fn reports_synthesized_name_collisions() {
    let mut service = ServiceDescription::new("widgets");
    let (_, types) = service.parts_mut();
    // A real `ListWidgetsAll` method next to the list-all handle of `ListWidgets`
    get_or_register(types, create_test_handle("ListWidgets", "ListWidgets", false));
    get_or_register(types, create_test_handle("ListWidgetsAll", "ListWidgets", true));
    get_or_register(types, create_test_handle("ListWidgetsAll", "ListWidgetsAll", false));
    assert_eq!(service.types().len(), 3);

    let warnings = ModelValidator::new().name_collisions(&service);
    assert_eq!(
        warnings,
        vec![
            "Polling handle name `ListWidgetsAll` is synthesized for ListWidgets (list all), ListWidgetsAll"
                .to_string()
        ]
    );

    let diagnostics = CompilerDiagnostics::collect(&service);
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warnings.len(), 1);
}

#[test]
fn reports_handle_shared_by_distinct_methods() {
    let mut service = ServiceDescription::new("widgets");
    let widget = service.register_type(ModelType::composite("Widget"));
    let (_, types) = service.parts_mut();
    let handle = get_or_register(
        types,
        ModelType::from(PollingHandle {
            name: "WidgetsCreate".into(),
            list_all: false,
            group: "widgets".into(),
            method: "Create".into(),
            result: Some(widget),
        }),
    );
    for (group, name) in [("widgets", "Create"), ("", "WidgetsCreate")] {
        service.insert_method(Method::new(
            group,
            name,
            OperationKind::LongRunning,
            ReturnType::response(Some(handle), None),
        ));
    }

    assert!(ModelValidator::new().validate(&service).is_empty());
    assert_eq!(
        ModelValidator::new().name_collisions(&service),
        vec!["Polling handle name `WidgetsCreate` is synthesized for widgets.Create, WidgetsCreate"]
    );
}
