// Orchestrator behavior: tenant scoping, rule isolation, result ordering

use std::sync::Arc;
use uuid::Uuid;

use crate::automation::{
    ActionExecutor, AutomationAction, AutomationEngine, AutomationRule, InMemoryRuleStore,
    RuleStore, TriggerEvent, TriggerType,
};
use crate::services::InMemoryMessageLog;
use crate::tests::fixtures::{deal_won_rule, quote_reply_rule, quote_sms_event};
use crate::tests::helpers::{
    ErroringEmailSender, FailingRuleStore, RecordingEmailSender, RecordingSmsSender,
    VerbatimRuleStore,
};

struct Harness {
    engine: AutomationEngine,
    sms: Arc<RecordingSmsSender>,
    email: Arc<RecordingEmailSender>,
    log: Arc<InMemoryMessageLog>,
}

fn harness(store: Arc<dyn RuleStore>) -> Harness {
    crate::tests::helpers::init_tracing();
    let sms = Arc::new(RecordingSmsSender::new());
    let email = Arc::new(RecordingEmailSender::new());
    let log = Arc::new(InMemoryMessageLog::new());
    let executor = ActionExecutor::new(sms.clone(), email.clone(), log.clone());
    Harness {
        engine: AutomationEngine::new(store, executor),
        sms,
        email,
        log,
    }
}

#[tokio::test]
async fn test_end_to_end_quote_reply() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    store.insert(quote_reply_rule(tenant)).await;

    let h = harness(store);
    let results = h.engine.process_automations(&quote_sms_event(tenant)).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].action, "send_sms");
    assert_eq!(
        results[0].message.as_deref(),
        Some("SMS sent to +15551234567")
    );
    assert!(results[0].error.is_none());

    let sent = h.sms.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+15551234567");
    assert_eq!(sent[0].body, "Thanks! We'll send a quote shortly.");

    // No contact on the event, so nothing was logged
    assert!(h.log.records().await.is_empty());
}

#[tokio::test]
async fn test_store_failure_yields_single_synthetic_result() {
    let tenant = Uuid::new_v4();
    let h = harness(Arc::new(FailingRuleStore));

    let results = h.engine.process_automations(&quote_sms_event(tenant)).await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(results[0].action, "process_automations");
    assert!(results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("connection refused"));
    assert!(h.sms.sent().is_empty());
}

#[tokio::test]
async fn test_other_tenants_rules_never_fire() {
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    store.insert(quote_reply_rule(tenant_a)).await;
    store.insert(quote_reply_rule(tenant_b)).await;

    let h = harness(store);
    let results = h.engine.process_automations(&quote_sms_event(tenant_a)).await;

    assert_eq!(results.len(), 1);
    assert_eq!(h.sms.sent().len(), 1);
}

#[tokio::test]
async fn test_inactive_rule_never_fires_even_from_a_sloppy_store() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(VerbatimRuleStore {
        rules: vec![quote_reply_rule(tenant).inactive()],
    });

    let h = harness(store);
    let results = h.engine.process_automations(&quote_sms_event(tenant)).await;

    assert!(results.is_empty());
    assert!(h.sms.sent().is_empty());
}

#[tokio::test]
async fn test_trigger_type_mismatch_is_silently_skipped() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    store.insert(quote_reply_rule(tenant)).await;

    let h = harness(store);
    let event = TriggerEvent::deal_stage_changed(tenant, Uuid::new_v4(), "new", "won", None);
    let results = h.engine.process_automations(&event).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_empty_trigger_value_fires_on_every_event_of_its_type() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    store
        .insert(AutomationRule::new(
            tenant,
            "welcome every lead",
            TriggerType::LeadCreated,
            AutomationAction::send_sms("+15550009999", "Welcome!"),
        ))
        .await;

    let h = harness(store);
    let event = TriggerEvent::new(tenant, TriggerType::LeadCreated, serde_json::json!({}));
    let results = h.engine.process_automations(&event).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
}

#[tokio::test]
async fn test_one_rules_failure_does_not_stop_the_next() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    store
        .insert(AutomationRule::new(
            tenant,
            "notify ops",
            TriggerType::SmsReceived,
            AutomationAction::send_email("ops@example.com", Some("Inbound SMS"), "<p>New SMS</p>"),
        ))
        .await;
    store
        .insert(AutomationRule::new(
            tenant,
            "auto ack",
            TriggerType::SmsReceived,
            AutomationAction::send_sms("contact", "Got it, we'll be in touch."),
        ))
        .await;

    // The email adapter errors like a thrown exception; SMS still goes out.
    let sms = Arc::new(RecordingSmsSender::new());
    let executor = ActionExecutor::new(
        sms.clone(),
        Arc::new(ErroringEmailSender),
        Arc::new(InMemoryMessageLog::new()),
    );
    let engine = AutomationEngine::new(store, executor);

    let results = engine.process_automations(&quote_sms_event(tenant)).await;

    assert_eq!(results.len(), 2);
    assert!(!results[0].success);
    assert_eq!(results[0].action, "send_email");
    assert!(results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("smtp connection refused"));
    assert!(results[1].success);
    assert_eq!(results[1].action, "send_sms");
    assert_eq!(sms.sent().len(), 1);
}

#[tokio::test]
async fn test_results_follow_store_order() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    for (name, number) in [
        ("first", "+15550000001"),
        ("second", "+15550000002"),
        ("third", "+15550000003"),
    ] {
        store
            .insert(AutomationRule::new(
                tenant,
                name,
                TriggerType::SmsReceived,
                AutomationAction::send_sms(number, "ping"),
            ))
            .await;
    }

    let h = harness(store);
    let results = h.engine.process_automations(&quote_sms_event(tenant)).await;

    let messages: Vec<&str> = results
        .iter()
        .map(|r| r.message.as_deref().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "SMS sent to +15550000001",
            "SMS sent to +15550000002",
            "SMS sent to +15550000003"
        ]
    );
    let sent = h.sms.sent();
    let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
    assert_eq!(
        recipients,
        vec!["+15550000001", "+15550000002", "+15550000003"]
    );
}

#[tokio::test]
async fn test_run_count_bumps_once_per_match() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    let rule = quote_reply_rule(tenant);
    let rule_id = rule.id;
    store.insert(rule).await;

    let h = harness(store.clone());
    h.engine.process_automations(&quote_sms_event(tenant)).await;

    assert_eq!(store.get(rule_id).await.unwrap().run_count, 1);

    // A non-matching event leaves the counter alone
    let other = TriggerEvent::sms_received(tenant, "+15551234567", "hello there", None);
    h.engine.process_automations(&other).await;
    assert_eq!(store.get(rule_id).await.unwrap().run_count, 1);
}

#[tokio::test]
async fn test_deactivation_takes_effect_on_the_next_event() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    let rule = quote_reply_rule(tenant);
    let rule_id = rule.id;
    store.insert(rule).await;

    let h = harness(store.clone());
    assert_eq!(
        h.engine
            .process_automations(&quote_sms_event(tenant))
            .await
            .len(),
        1
    );

    store.set_active(rule_id, false).await.unwrap();
    assert!(h
        .engine
        .process_automations(&quote_sms_event(tenant))
        .await
        .is_empty());
}

#[tokio::test]
async fn test_convenience_wrappers_delegate() {
    let tenant = Uuid::new_v4();
    let store = Arc::new(InMemoryRuleStore::new());
    store.insert(quote_reply_rule(tenant)).await;
    store
        .insert(deal_won_rule(
            tenant,
            AutomationAction::send_email("sales@example.com", None, "<p>We won!</p>"),
        ))
        .await;

    let h = harness(store);

    let sms_results = h
        .engine
        .trigger_sms_automation(tenant, "+15551234567", "quote please", None)
        .await;
    assert_eq!(sms_results.len(), 1);
    assert_eq!(sms_results[0].action, "send_sms");

    let deal_results = h
        .engine
        .trigger_deal_stage_automation(tenant, Uuid::new_v4(), "qualified", "won", None)
        .await;
    assert_eq!(deal_results.len(), 1);
    assert_eq!(deal_results[0].action, "send_email");
    assert_eq!(h.email.sent().len(), 1);

    let lead_results = h
        .engine
        .trigger_lead_created_automation(tenant, Uuid::new_v4(), None)
        .await;
    assert!(lead_results.is_empty());
}
