use chrono::NaiveDate;
use divipago_application::{AppState, StoreError};
use divipago_domain::{ExpenseCategory, ExpenseId, Money, ParticipantId, SettlementEngine};
use rstest::{fixture, rstest};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")
}

#[fixture]
fn three_person_trip() -> (AppState, ExpenseId, Vec<ParticipantId>) {
    let (mut state, expense_id) = AppState::default()
        .add_expense("weekend trip", ExpenseCategory::Entretenimiento, date())
        .expect("valid expense");
    let mut ids = Vec::with_capacity(3);
    for name in ["Ana", "Bruno", "Carla"] {
        let (next, id) = state
            .add_participant(expense_id, name)
            .expect("valid participant");
        state = next;
        ids.push(id);
    }
    (state, expense_id, ids)
}

#[rstest]
fn mutations_leave_the_previous_state_untouched(
    three_person_trip: (AppState, ExpenseId, Vec<ParticipantId>),
) {
    let (state, expense_id, ids) = three_person_trip;
    let before = state.clone();

    let (after, _) = state
        .add_item(expense_id, "hotel", Money::from_i64(90), Some(ids[0]), vec![])
        .expect("valid item");

    assert_eq!(state, before);
    assert_eq!(state.expense(expense_id).expect("expense exists").items.len(), 0);
    assert_eq!(after.expense(expense_id).expect("expense exists").items.len(), 1);
}

#[rstest]
fn removing_a_participant_scrubs_payer_and_subgroup_references(
    three_person_trip: (AppState, ExpenseId, Vec<ParticipantId>),
) {
    let (state, expense_id, ids) = three_person_trip;
    let (ana, bruno, carla) = (ids[0], ids[1], ids[2]);
    let (state, _) = state
        .add_item(
            expense_id,
            "hotel",
            Money::from_i64(90),
            Some(bruno),
            vec![ana, bruno, carla],
        )
        .expect("valid item");

    let state = state
        .remove_participant(expense_id, bruno)
        .expect("participant exists");

    let expense = state.expense(expense_id).expect("expense exists");
    let item = &expense.items[0];
    assert_eq!(item.payer, None);
    assert_eq!(item.subgroup, vec![ana, carla]);

    // With the reference scrubbed the divisor shrinks to two: nobody inherits
    // a dangling id and the remaining members each owe 45.
    let sheet = SettlementEngine::balances(expense);
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet[&ana].owes, Money::from_i64(45));
    assert_eq!(sheet[&carla].owes, Money::from_i64(45));
    assert!(SettlementEngine::settlement(expense).is_empty());
}

#[rstest]
fn rejects_items_with_invalid_fields(three_person_trip: (AppState, ExpenseId, Vec<ParticipantId>)) {
    let (state, expense_id, ids) = three_person_trip;
    let ana = ids[0];

    let err = state
        .add_item(expense_id, "free lunch", Money::ZERO, Some(ana), vec![])
        .expect_err("zero amount");
    assert!(matches!(err, StoreError::InvalidAmount(_)));

    let err = state
        .add_item(expense_id, "refund", Money::from_i64(-10), Some(ana), vec![])
        .expect_err("negative amount");
    assert!(matches!(err, StoreError::InvalidAmount(_)));

    let err = state
        .add_item(expense_id, "   ", Money::from_i64(10), Some(ana), vec![])
        .expect_err("blank description");
    assert!(matches!(err, StoreError::EmptyDescription));

    let stranger = ParticipantId::new();
    let err = state
        .add_item(expense_id, "taxi", Money::from_i64(10), Some(stranger), vec![])
        .expect_err("unknown payer");
    assert!(matches!(err, StoreError::ParticipantNotFound { .. }));

    let err = state
        .add_item(expense_id, "taxi", Money::from_i64(10), Some(ana), vec![stranger])
        .expect_err("unknown subgroup member");
    assert!(matches!(err, StoreError::ParticipantNotFound { .. }));
}

#[rstest]
fn reassigning_a_payer_requires_a_current_participant(
    three_person_trip: (AppState, ExpenseId, Vec<ParticipantId>),
) {
    let (state, expense_id, ids) = three_person_trip;
    let (ana, bruno) = (ids[0], ids[1]);
    let (state, item_id) = state
        .add_item(expense_id, "dinner", Money::from_i64(60), Some(ana), vec![])
        .expect("valid item");

    let state = state
        .reassign_item_payer(expense_id, item_id, Some(bruno))
        .expect("current participant");
    assert_eq!(
        state.expense(expense_id).expect("expense exists").items[0].payer,
        Some(bruno)
    );

    let stranger = ParticipantId::new();
    let err = state
        .reassign_item_payer(expense_id, item_id, Some(stranger))
        .expect_err("unknown payer");
    assert!(matches!(err, StoreError::ParticipantNotFound { .. }));

    let state = state
        .reassign_item_payer(expense_id, item_id, None)
        .expect("clearing is always allowed");
    assert_eq!(
        state.expense(expense_id).expect("expense exists").items[0].payer,
        None
    );
}

#[rstest]
fn filters_combine_conjunctively(three_person_trip: (AppState, ExpenseId, Vec<ParticipantId>)) {
    let (state, _, _) = three_person_trip;
    let (state, _) = state
        .add_expense(
            "birthday dinner",
            ExpenseCategory::Restaurante,
            NaiveDate::from_ymd_opt(2026, 7, 15).expect("valid date"),
        )
        .expect("valid expense");

    let searched = state.with_search_query("trip");
    assert_eq!(searched.filtered_expenses().len(), 1);
    assert_eq!(searched.filtered_expenses()[0].title, "weekend trip");

    let by_category = state.with_selected_category(Some(ExpenseCategory::Restaurante));
    assert_eq!(by_category.filtered_expenses().len(), 1);
    assert_eq!(by_category.filtered_expenses()[0].title, "birthday dinner");

    let narrowed = by_category.with_date_range(Some(date()), None);
    assert!(narrowed.filtered_expenses().is_empty());
}

#[rstest]
#[case::empty(&[], &[])]
#[case::single(
    &[(ExpenseCategory::Comida, 120)],
    &[(ExpenseCategory::Comida, 120)],
)]
#[case::aggregates_per_category(
    &[
        (ExpenseCategory::Comida, 120),
        (ExpenseCategory::Transporte, 35),
        (ExpenseCategory::Comida, 80),
    ],
    &[(ExpenseCategory::Comida, 200), (ExpenseCategory::Transporte, 35)],
)]
fn category_totals_aggregate_across_expenses(
    #[case] spends: &[(ExpenseCategory, i64)],
    #[case] expected: &[(ExpenseCategory, i64)],
) {
    let mut state = AppState::default();
    for (category, amount) in spends {
        let (next, expense_id) = state
            .add_expense("salida", *category, date())
            .expect("valid expense");
        let (next, payer) = next
            .add_participant(expense_id, "Ana")
            .expect("valid participant");
        let (next, _) = next
            .add_item(expense_id, "gasto", Money::from_i64(*amount), Some(payer), vec![])
            .expect("valid item");
        state = next;
    }

    let totals = state.category_totals();

    assert_eq!(totals.len(), expected.len());
    for (category, amount) in expected {
        assert_eq!(totals[category], Money::from_i64(*amount));
    }
}

#[rstest]
fn export_then_import_reproduces_the_state(
    three_person_trip: (AppState, ExpenseId, Vec<ParticipantId>),
) {
    let (state, expense_id, ids) = three_person_trip;
    let (state, _) = state
        .add_item(
            expense_id,
            "empanadas",
            Money::new(12_550, 2),
            Some(ids[0]),
            vec![ids[0], ids[1]],
        )
        .expect("valid item");
    let state = state.with_currency("UYU").with_search_query("trip");

    let snapshot = state.export_data().expect("serializable state");
    let restored = AppState::import_data(&snapshot).expect("valid snapshot");

    assert_eq!(restored, state);
}

#[test]
fn import_rejects_malformed_snapshots() {
    let err = AppState::import_data("{\"expenses\": 42}").expect_err("not app data");
    assert!(matches!(err, StoreError::InvalidSnapshot(_)));
}

#[test]
fn missing_snapshot_sections_fall_back_to_defaults() {
    let restored = AppState::import_data("{\"expenses\": []}").expect("minimal snapshot");

    assert_eq!(restored.settings.currency, "ARS");
    assert_eq!(restored.filter, divipago_application::FilterState::default());
}

#[test]
fn removing_missing_entities_reports_which_one() {
    let state = AppState::default();
    let ghost = ExpenseId::new();

    let err = state.remove_expense(ghost).expect_err("no such expense");
    assert!(matches!(err, StoreError::ExpenseNotFound(id) if id == ghost));

    let (state, expense_id) = state
        .add_expense("dinner", ExpenseCategory::Restaurante, date())
        .expect("valid expense");
    let stranger = ParticipantId::new();
    let err = state
        .remove_participant(expense_id, stranger)
        .expect_err("no such participant");
    assert!(matches!(err, StoreError::ParticipantNotFound { .. }));
}
