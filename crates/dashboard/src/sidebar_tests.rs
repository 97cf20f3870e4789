use std::path::Path;
use std::sync::Arc;

use cogdbg_core::{
    BreakpointAction, BreakpointInfo, DashboardEvent, DriverKind, Location, SessionId, StackFrame,
    Variable,
};

use super::*;
use crate::source::SourceLoader;
use crate::state::DashboardState;

struct EmptyLoader;
impl SourceLoader for EmptyLoader {
    fn load(&self, _path: &Path) -> std::io::Result<Vec<String>> {
        Ok(vec!["x".to_owned()])
    }
}

fn launched() -> (DashboardState, SessionId) {
    let mut state = DashboardState::new(Arc::new(EmptyLoader));
    let id = SessionId::new("session-1");
    state.apply_event(DashboardEvent::Launch {
        session_id: id.clone(),
        program: "/bin/true".to_owned(),
        driver: DriverKind::Native,
    });
    (state, id)
}

#[test]
fn empty_view_has_no_rows() {
    let (state, id) = launched();
    let view = state.view(&id).unwrap();
    assert!(rows(view).is_empty());
}

#[test]
fn sections_omitted_when_empty() {
    let (mut state, id) = launched();
    state.apply_event(DashboardEvent::Stop {
        session_id: id.clone(),
        reason: "step".to_owned(),
        location: Some(Location {
            file: "/tmp/a.c".into(),
            line: 1,
            function: None,
        }),
        stack_trace: vec![StackFrame {
            index: 0,
            name: "main".to_owned(),
            location: None,
        }],
        locals: vec![],
    });
    let view = state.view(&id).unwrap();
    let rows = rows(view);
    assert_eq!(rows.len(), 1);
    assert!(matches!(rows[0], SidebarRow::Frame { .. }));
}

#[test]
fn full_list_orders_frames_then_locals_then_breakpoints() {
    let (mut state, id) = launched();
    state.apply_event(DashboardEvent::Stop {
        session_id: id.clone(),
        reason: "step".to_owned(),
        location: None,
        stack_trace: vec![StackFrame {
            index: 0,
            name: "main".to_owned(),
            location: None,
        }],
        locals: vec![Variable {
            name: "x".to_owned(),
            value: "1".to_owned(),
            ty: Some("i32".to_owned()),
        }],
    });
    state.apply_event(DashboardEvent::Breakpoint {
        session_id: id.clone(),
        action: BreakpointAction::Set,
        bp: Some(BreakpointInfo {
            id: 1,
            file: "/tmp/a.c".into(),
            line: 4,
            verified: true,
            condition: None,
            hit_condition: None,
            log_message: None,
        }),
    });

    let view = state.view(&id).unwrap();
    let list = rows(view);
    assert!(matches!(list[0], SidebarRow::Frame { .. }));
    assert!(matches!(list[1], SidebarRow::LocalsHeader));
    assert!(matches!(list[2], SidebarRow::Local { .. }));
    assert!(matches!(list[3], SidebarRow::BreakpointsHeader));
    assert!(matches!(list[4], SidebarRow::Breakpoint { .. }));
    assert_eq!(list.len(), 5);
}
