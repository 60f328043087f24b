use super::*;
use crate::state::storage::MemoryStorage;

#[test]
fn location_of_joins_search() {
    assert_eq!(location_of("/home", ""), "/home");
    assert_eq!(location_of("/login", "redirect=%2Fhome"), "/login?redirect=%2Fhome");
    assert_eq!(location_of("/login", "?redirect=%2Fhome"), "/login?redirect=%2Fhome");
}

#[test]
fn shell_context_shares_one_session() {
    let ctx = ShellContext::new(ShellConfig::default(), RouteTable::standard(), Arc::new(MemoryStorage::new()));
    ctx.session.save("tok", &crate::test_support::profile("2")).unwrap();
    assert!(ctx.gateway.session().is_authenticated());
    let home = ctx.router.table().resolve("/home").unwrap();
    assert_eq!(ctx.router.guard().decide(home, "/home"), crate::router::guard::GuardDecision::Proceed);
}
