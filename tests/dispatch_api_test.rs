// ==========================================
// 调度 API 集成测试
// ==========================================
// 测试范围:
// 1. 推荐时任务位置取自订单地址
// 2. 派工 → 出发 → 到场 → 完工 的完整流程与快照一致性
// 3. 多人任务: 最后一名成员离场后结算终态
// 4. 判定失败时快照保持不变
// 5. 装配工入池校验
// 6. 快照审计
// ==========================================

mod helpers;

use assembly_dispatch::api::{ApiError, DispatchApi};
use assembly_dispatch::config::DispatchConfig;
use assembly_dispatch::domain::{
    AssemblerStatus, DispatchSnapshot, JobEventType, Location, MatchReason, SkillLevel,
    TaskStatus,
};
use assembly_dispatch::engine::{AssemblerStatusMachine, AssemblerTrigger};
use assembly_dispatch::logging;
use helpers::test_data_builder::{fixed_time, AssemblerBuilder, OrderBuilder, TaskBuilder};

// ==========================================
// 测试辅助函数
// ==========================================

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// 两个订单: o1 在 CBD, o2 在 Takapuna
fn create_test_api() -> DispatchApi {
    logging::init_test();

    let snapshot = DispatchSnapshot {
        orders: vec![
            OrderBuilder::new("o1").item("PAX Wardrobe", 1).build(),
            OrderBuilder::new("o2")
                .customer("Bob Smith")
                .address(Location::new(-36.7877, 174.7766, "101 Hurstmere Rd, Takapuna"))
                .build(),
        ],
        tasks: vec![
            TaskBuilder::new("t1", "o1").requires(SkillLevel::Hard).build(),
            TaskBuilder::new("t2", "o2").requires(SkillLevel::Easy).build(),
        ],
        assemblers: vec![
            AssemblerBuilder::new("a1")
                .name("Bjorn Svensson")
                .skills(&[SkillLevel::Easy, SkillLevel::Medium, SkillLevel::Hard])
                .rating(5.0)
                .km_from_cbd(0.2)
                .build(),
            AssemblerBuilder::new("a2")
                .name("Sarah Connor")
                .skills(&[SkillLevel::Easy, SkillLevel::Medium])
                .rating(4.8)
                .km_from_cbd(1.0)
                .build(),
            AssemblerBuilder::new("a3")
                .name("Mike Ross")
                .skills(&[SkillLevel::Easy])
                .rating(3.5)
                .location(Location::new(-36.78, 174.77, "Milford"))
                .build(),
        ],
    };

    DispatchApi::new(snapshot, DispatchConfig::default())
}

// ==========================================
// 推荐
// ==========================================

#[test]
fn test_recommend_uses_order_location() {
    let api = create_test_api();

    let t1 = api.recommend_for_task("t1").unwrap();
    assert_eq!(t1[0].assembler.id, "a1");
    assert!(t1[0].has_reason(MatchReason::Nearby));

    // t2 在 Takapuna, Milford 的 a3 最近
    let t2 = api.recommend_for_task("t2").unwrap();
    let a3 = t2.iter().find(|r| r.assembler.id == "a3").unwrap();
    assert!(a3.has_reason(MatchReason::Nearby));
    assert!(a3.has_reason(MatchReason::PerfectSkillMatch));
}

#[test]
fn test_recommend_unknown_task_or_order() {
    let mut api = create_test_api();
    assert!(matches!(
        api.recommend_for_task("nope"),
        Err(ApiError::NotFound(_))
    ));

    let mut snapshot = api.into_snapshot();
    snapshot.tasks.push(TaskBuilder::new("t3", "missing-order").build());
    api = DispatchApi::new(snapshot, DispatchConfig::default());
    assert!(matches!(
        api.recommend_for_task("t3"),
        Err(ApiError::NotFound(_))
    ));
}

// ==========================================
// 派工与生命周期
// ==========================================

#[test]
fn test_assign_and_complete_flow() {
    let mut api = create_test_api();
    let at = fixed_time();

    let decision = api.assign("t1", &ids(&["a1", "a2"]), at).unwrap();
    assert_eq!(decision.task.status, TaskStatus::Assigned);
    assert_eq!(decision.assemblers.len(), 2);

    // 快照已同步
    assert_eq!(api.task("t1").unwrap().assigned_assembler_ids, ids(&["a1", "a2"]));
    assert_eq!(api.assembler("a1").unwrap().status, AssemblerStatus::Assigned);
    assert_eq!(api.available_assemblers().len(), 1);
    assert_eq!(api.open_tasks().len(), 1);

    for trigger in [
        AssemblerTrigger::StartTravel,
        AssemblerTrigger::ArriveAtSite,
        AssemblerTrigger::CompleteTask,
    ] {
        api.fire_trigger("t1", "a1", trigger, at).unwrap();
    }
    api.fire_trigger("t1", "a2", AssemblerTrigger::CancelTask, at)
        .unwrap();

    let task = api.task("t1").unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.assigned_assembler_ids, ids(&["a1"]));
    assert_eq!(
        task.history.iter().map(|e| e.event_type).collect::<Vec<_>>(),
        vec![
            JobEventType::WorkerAssigned,
            JobEventType::WorkerAssigned,
            JobEventType::WorkerEnroute,
            JobEventType::JobStarted,
            JobEventType::JobCompleted,
        ]
    );

    // 两人都回到空闲, 快照一致
    assert_eq!(api.available_assemblers().len(), 3);
    assert!(api.audit().is_empty());
    for assembler in &api.snapshot().assemblers {
        assert!(AssemblerStatusMachine::validate_assembler(assembler).is_ok());
    }
}

#[test]
fn test_crew_task_completes_only_after_last_member() {
    let mut api = create_test_api();
    let at = fixed_time();
    api.assign("t1", &ids(&["a1", "a2"]), at).unwrap();

    for id in ["a1", "a2"] {
        api.fire_trigger("t1", id, AssemblerTrigger::StartTravel, at)
            .unwrap();
        api.fire_trigger("t1", id, AssemblerTrigger::ArriveAtSite, at)
            .unwrap();
    }

    api.fire_trigger("t1", "a1", AssemblerTrigger::CompleteTask, at)
        .unwrap();
    assert_eq!(api.task("t1").unwrap().status, TaskStatus::InProgress);
    assert_eq!(api.assembler("a2").unwrap().status, AssemblerStatus::Working);

    // a2 中止: 任务以 ISSUE 结算, 与历史一致
    api.fire_trigger("t1", "a2", AssemblerTrigger::AbortTask, at)
        .unwrap();
    let task = api.task("t1").unwrap();
    assert_eq!(task.status, TaskStatus::Issue);
    assert_eq!(
        task.last_event().map(|e| e.event_type),
        Some(JobEventType::IssueReported)
    );
    assert!(api.audit().is_empty());
}

#[test]
fn test_rejected_assignment_leaves_snapshot_untouched() {
    let mut api = create_test_api();
    let before = api.snapshot().clone();

    // a2 合法, ghost 不存在 → 整体拒绝
    let err = api
        .assign("t2", &ids(&["a2", "ghost"]), fixed_time())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(api.snapshot(), &before);
}

#[test]
fn test_busy_assembler_cannot_be_assigned_twice() {
    let mut api = create_test_api();
    api.assign("t1", &ids(&["a1"]), fixed_time()).unwrap();

    let err = api.assign("t2", &ids(&["a1"]), fixed_time()).unwrap_err();
    assert_eq!(err.code(), "ASSIGNMENT_REJECTED");
}

#[test]
fn test_illegal_trigger_maps_to_transition_error() {
    let mut api = create_test_api();
    api.assign("t1", &ids(&["a1"]), fixed_time()).unwrap();

    let err = api
        .fire_trigger("t1", "a1", AssemblerTrigger::CompleteTask, fixed_time())
        .unwrap_err();
    match err {
        ApiError::InvalidStateTransition { from, to, allowed, .. } => {
            assert_eq!(from, AssemblerStatus::Assigned);
            assert_eq!(to, AssemblerStatus::Available);
            assert_eq!(allowed, vec![AssemblerStatus::EnRoute, AssemblerStatus::Available]);
        }
        other => panic!("Expected InvalidStateTransition, got {:?}", other),
    }

    assert!(api.check_transition("a1", AssemblerStatus::EnRoute).is_ok());
    assert!(api.check_transition("a1", AssemblerStatus::Working).is_err());
}

#[test]
fn test_register_order_creates_open_task() {
    let mut api = create_test_api();
    let task = api
        .register_order(OrderBuilder::new("o9").build(), fixed_time())
        .unwrap();

    assert_eq!(task.order_id, "o9");
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.required_skill, SkillLevel::Medium);
    assert_eq!(api.open_tasks().len(), 3);
    assert!(api.recommend_for_task(&task.id).is_ok());

    assert!(api
        .register_order(OrderBuilder::new("o9").build(), fixed_time())
        .is_err());
}

// ==========================================
// 装配工入池
// ==========================================

#[test]
fn test_register_assembler_accepts_idle_profile() {
    let mut api = create_test_api();
    let newcomer = AssemblerBuilder::new("a4")
        .name("Aroha Ngata")
        .skills(&[SkillLevel::Medium])
        .rating(4.2)
        .build();

    let registered = api.register_assembler(newcomer.clone()).unwrap();
    assert_eq!(registered, newcomer);
    assert_eq!(api.assembler("a4").unwrap().status, AssemblerStatus::Available);
    assert_eq!(api.available_assemblers().len(), 4);
    assert_eq!(api.recommend_for_task("t1").unwrap().len(), 4);
}

#[test]
fn test_register_assembler_rejects_bad_profiles() {
    let mut api = create_test_api();
    let before = api.snapshot().clone();

    let rejected = [
        AssemblerBuilder::new("a1").build(),
        AssemblerBuilder::new("a5").skills(&[]).build(),
        AssemblerBuilder::new("a6").rating(5.5).build(),
        AssemblerBuilder::new("a7").rating(-0.1).build(),
        AssemblerBuilder::new("a8").rating(f64::NAN).build(),
        AssemblerBuilder::new("a9")
            .location(Location::new(95.0, 174.7, "Nowhere"))
            .build(),
        AssemblerBuilder::new("a10")
            .busy_with(AssemblerStatus::Assigned, "t1")
            .build(),
        AssemblerBuilder::new("a11")
            .raw_state(AssemblerStatus::Available, Some("t2"))
            .build(),
    ];

    for assembler in rejected {
        let id = assembler.id.clone();
        let err = api.register_assembler(assembler).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT", "{} should be rejected", id);
    }
    assert_eq!(api.snapshot(), &before);
}

// ==========================================
// 审计
// ==========================================

#[test]
fn test_audit_reports_corrupt_assemblers() {
    let snapshot = DispatchSnapshot {
        assemblers: vec![
            AssemblerBuilder::new("ok").build(),
            AssemblerBuilder::new("ghost-task")
                .raw_state(AssemblerStatus::Available, Some("t1"))
                .build(),
            AssemblerBuilder::new("no-task")
                .raw_state(AssemblerStatus::EnRoute, None)
                .build(),
        ],
        ..DispatchSnapshot::default()
    };
    let api = DispatchApi::new(snapshot, DispatchConfig::default());

    let issues = api.audit();
    let flagged: Vec<&str> = issues.iter().map(|i| i.assembler_id.as_str()).collect();
    assert_eq!(flagged, vec!["ghost-task", "no-task"]);
    assert_eq!(issues[1].status, AssemblerStatus::EnRoute);
}
