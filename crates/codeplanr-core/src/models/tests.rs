use std::str::FromStr;

use crate::{
    error::AgentError,
    models::{Action, Plan, PlanStatus, Step, StepStatus},
};

fn create_test_step(id: u32) -> Step {
    Step::new(
        id,
        format!("Step number {id}"),
        Some(Action::WriteCode),
        Some("main.py".to_string()),
    )
}

fn create_test_plan(steps: u32) -> Plan {
    Plan::new("write a python script", (1..=steps).map(create_test_step).collect())
}

#[test]
fn test_step_forward_transitions() {
    let mut step = create_test_step(1);
    assert_eq!(step.status, StepStatus::Pending);

    step.start().expect("pending step should start");
    assert_eq!(step.status, StepStatus::InProgress);
    assert!(step.result.is_none() && step.error.is_none());

    step.complete("Wrote code to main.py")
        .expect("running step should complete");
    assert_eq!(step.status, StepStatus::Completed);
    assert_eq!(step.result.as_deref(), Some("Wrote code to main.py"));
    assert!(step.error.is_none());
}

#[test]
fn test_failed_step_sets_only_error() {
    let mut step = create_test_step(1);
    step.start().unwrap();
    step.fail("File main.py does not exist").unwrap();

    assert_eq!(step.status, StepStatus::Failed);
    assert!(step.result.is_none());
    assert_eq!(step.error.as_deref(), Some("File main.py does not exist"));
}

#[test]
fn test_terminal_steps_cannot_move() {
    let mut step = create_test_step(4);
    step.start().unwrap();
    step.complete("done").unwrap();

    let err = step.start().unwrap_err();
    assert!(matches!(
        err,
        AgentError::InvalidTransition {
            step_id: 4,
            from: StepStatus::Completed,
            to: StepStatus::InProgress,
        }
    ));
    assert!(step.fail("late failure").is_err());
    assert_eq!(step.status, StepStatus::Completed);
    assert!(step.error.is_none());
}

#[test]
fn test_pending_step_cannot_complete() {
    let mut step = create_test_step(1);
    assert!(step.complete("skipped ahead").is_err());
    assert!(step.result.is_none());
    assert_eq!(step.status, StepStatus::Pending);
}

#[test]
fn test_plan_status_is_derived_from_steps() {
    let mut plan = create_test_plan(3);
    assert_eq!(plan.status(), PlanStatus::Planning);

    plan.steps[0].start().unwrap();
    assert_eq!(plan.status(), PlanStatus::Executing);

    plan.steps[0].complete("ok").unwrap();
    assert_eq!(plan.status(), PlanStatus::Executing);
    assert_eq!(plan.progress(), (1, 3));

    plan.steps[1].start().unwrap();
    plan.steps[1].fail("boom").unwrap();
    assert_eq!(plan.status(), PlanStatus::Failed);
    assert_eq!(plan.steps[2].status, StepStatus::Pending);
}

#[test]
fn test_plan_completed_when_all_steps_complete() {
    let mut plan = create_test_plan(2);
    for step in &mut plan.steps {
        step.start().unwrap();
        step.complete("ok").unwrap();
    }
    assert_eq!(plan.status(), PlanStatus::Completed);
    assert_eq!(plan.progress(), (2, 2));
    assert!(!plan.is_untouched());
}

#[test]
fn test_empty_plan_stays_planning() {
    let plan = Plan::new("nothing", vec![]);
    assert_eq!(plan.status(), PlanStatus::Planning);
    assert_eq!(plan.progress(), (0, 0));
}

#[test]
fn test_action_from_str_variants() {
    assert_eq!(Action::from_str("create_file"), Ok(Action::CreateFile));
    assert_eq!(Action::from_str("Write-Code"), Ok(Action::WriteCode));
    assert_eq!(Action::from_str("check errors"), Ok(Action::CheckErrors));
    assert_eq!(Action::from_str("MODIFY_FILE"), Ok(Action::ModifyFile));
    assert!(Action::from_str("delete_file").is_err());
}

#[test]
fn test_action_inference_order() {
    assert_eq!(Action::infer("Create addition.cpp file"), Action::CreateFile);
    assert_eq!(Action::infer("Write C++ code for addition"), Action::WriteCode);
    assert_eq!(Action::infer("Check for compilation errors"), Action::CheckErrors);
    assert_eq!(Action::infer("Update the README"), Action::ModifyFile);
    assert_eq!(Action::infer("Refactor everything"), Action::WriteCode);
    // "create" + "file" wins over "check"
    assert_eq!(Action::infer("Create a file and check it"), Action::CreateFile);
}

#[test]
fn test_effective_action_falls_back_to_inference() {
    let step = Step::new(1, "Modify main.py to log", None, Some("main.py".to_string()));
    assert_eq!(step.effective_action(), Action::ModifyFile);

    let explicit = Step::new(2, "Modify main.py", Some(Action::CheckErrors), None);
    assert_eq!(explicit.effective_action(), Action::CheckErrors);
}

#[test]
fn test_step_status_serde_names() {
    let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
    assert_eq!(json, "\"in_progress\"");
    assert_eq!(StepStatus::from_str("in-progress"), Ok(StepStatus::InProgress));
    assert!(StepStatus::Failed.is_terminal());
    assert!(!StepStatus::InProgress.is_terminal());
}

#[test]
fn test_plan_step_lookup() {
    let plan = create_test_plan(3);
    assert_eq!(plan.step(2).map(|s| s.id), Some(2));
    assert!(plan.step(4).is_none());
    assert_eq!(plan.task(), "write a python script");
}
