use crate::app::AppState;
use crate::model::User;

/// Whether `user` matches `query`: name and university case-insensitively,
/// CNIC as typed.
pub fn matches(user: &User, query: &str) -> bool {
    let q = query.to_lowercase();
    user.fields.name.to_lowercase().contains(&q)
        || user.fields.cnic.contains(query)
        || user.fields.university.to_lowercase().contains(&q)
}

/// Indices into `users` that match `query`, in list order.
pub fn filter_indices(users: &[User], query: &str) -> Vec<usize> {
    users
        .iter()
        .enumerate()
        .filter(|(_, u)| query.is_empty() || matches(u, query))
        .map(|(i, _)| i)
        .collect()
}

/// Recompute the visible rows of the list screen and clamp the selection.
pub fn apply_search(app: &mut AppState) {
    app.visible = filter_indices(app.controller.users(), &app.search_query);
    app.selected_user_index = app.selected_user_index.min(app.visible.len().saturating_sub(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserFields;

    fn mk_user(id: &str, name: &str, cnic: &str, university: &str) -> User {
        User {
            id: id.to_string(),
            fields: UserFields {
                name: name.to_string(),
                cnic: cnic.to_string(),
                university: university.to_string(),
                ..Default::default()
            },
        }
    }

    fn sample() -> Vec<User> {
        vec![
            mk_user("a", "Ayesha Khan", "35202-1111111-1", "FAST NU"),
            mk_user("b", "Bilal Ahmed", "42101-2222222-2", "LUMS"),
            mk_user("c", "Sana Ali", "35202-3333333-3", "Punjab University"),
        ]
    }

    #[test]
    fn search_users_filters_by_name_case_insensitively() {
        assert_eq!(filter_indices(&sample(), "bILAL"), vec![1]);
    }

    #[test]
    fn search_users_filters_by_cnic_and_university() {
        let users = sample();
        assert_eq!(filter_indices(&users, "35202"), vec![0, 2]);
        assert_eq!(filter_indices(&users, "university"), vec![2]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        assert_eq!(filter_indices(&sample(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_indices(&sample(), "zzz").is_empty());
    }
}
