use axum::http::StatusCode;
use ozp_models::{Account, Group, Profile, ProfileId, Role};
use ozpcenter::middleware::auth::AuthUser;
use ozpcenter::middleware::role::{check_minimum_role, check_role_hierarchy};

fn create_test_auth_user(groups: &[Role]) -> AuthUser {
    AuthUser(Profile {
        id: ProfileId::new(1),
        display_name: "Test User".to_string(),
        is_new_user: false,
        user: Account {
            username: "tester".to_string(),
            groups: groups.iter().map(|&name| Group { name }).collect(),
        },
        organizations: vec![],
        stewarded_organizations: vec![],
    })
}

#[test]
fn test_role_hierarchy_levels() {
    assert!(Role::AppsMallSteward > Role::OrgSteward);
    assert!(Role::OrgSteward > Role::User);
    assert_eq!(Role::User.level(), 1);
    assert_eq!(Role::OrgSteward.level(), 2);
    assert_eq!(Role::AppsMallSteward.level(), 3);
}

#[test]
fn test_check_role_hierarchy_allows_equal_or_higher() {
    for user_role in Role::ALL {
        for required in Role::ALL {
            let result = check_role_hierarchy(user_role, required);
            assert_eq!(result.is_ok(), user_role >= required);
        }
    }
}

#[test]
fn test_check_role_hierarchy_denial_is_forbidden() {
    let err = check_role_hierarchy(Role::User, Role::AppsMallSteward).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_check_minimum_role_uses_highest_group() {
    let auth_user = create_test_auth_user(&[Role::User, Role::AppsMallSteward]);
    assert!(check_minimum_role(&auth_user, Role::AppsMallSteward).is_ok());

    let auth_user = create_test_auth_user(&[Role::OrgSteward]);
    assert!(check_minimum_role(&auth_user, Role::OrgSteward).is_ok());
    assert!(check_minimum_role(&auth_user, Role::AppsMallSteward).is_err());
}

#[test]
fn test_account_without_groups_is_a_user() {
    let auth_user = create_test_auth_user(&[]);
    assert_eq!(auth_user.role(), Role::User);
    assert!(check_minimum_role(&auth_user, Role::User).is_ok());
    assert!(check_minimum_role(&auth_user, Role::OrgSteward).is_err());
}
