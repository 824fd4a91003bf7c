//! Statement builder tests

#[cfg(test)]
mod tests {
    use crate::sql_generation::SqlGenerator;
    use crate::state::{Action, QueryState, TableInfo};
    use crate::{select, select_all, update, BuilderError, Connector, Operator, OrderType, Table};

    // ========================================
    // SELECT rendering
    // ========================================

    #[test]
    fn test_build_select_all() {
        let sql = select_all()
            .from("users")
            .r#where("name", Operator::Equal)
            .and()
            .r#where("age", Operator::Equal)
            .build()
            .unwrap();

        assert_eq!(sql, "SELECT * FROM users WHERE name = ? AND age = ?;");
    }

    #[test]
    fn test_build_select_columns() {
        let sql = select(["id", "name", "age"])
            .from("users")
            .r#where("name", Operator::Equal)
            .and()
            .r#where("age", Operator::Equal)
            .build()
            .unwrap();

        assert_eq!(sql, "SELECT id, name, age FROM users WHERE name = ? AND age = ?;");
    }

    #[test]
    fn test_build_select_without_conditions() {
        let sql = select(["id"]).from("users").build().unwrap();
        assert_eq!(sql, "SELECT id FROM users;");
    }

    #[test]
    fn test_build_select_with_counter() {
        let sql = select_all()
            .with_counter()
            .from("users")
            .r#where("name", Operator::Equal)
            .and()
            .r#where("age", Operator::Equal)
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT *, (SELECT count(*) FROM users WHERE name = ? AND age = ?) as total FROM users WHERE name = ? AND age = ?;"
        );
    }

    #[test]
    fn test_counter_ignores_order_and_limit() {
        let sql = select(["id", "name"])
            .with_counter()
            .from("users")
            .r#where("age", Operator::GreaterEqualsThan)
            .order_by(OrderType::Desc, ["age"])
            .limit(20, 10)
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT id, name, (SELECT count(*) FROM users WHERE age >= ?) as total FROM users WHERE age >= ? ORDER BY age LIMIT 20, 10;"
        );
    }

    #[test]
    fn test_build_select_with_order_and_limit() {
        let sql = select(["id", "name", "age"])
            .from("users")
            .r#where("name", Operator::Equal)
            .and()
            .r#where("age", Operator::Equal)
            .order_by(OrderType::Asc, ["id", "name"])
            .limit(0, 10)
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT id, name, age FROM users WHERE name = ? AND age = ? ORDER BY id, name LIMIT 0, 10;"
        );
    }

    #[test]
    fn test_mixed_unions() {
        let sql = select_all()
            .from("users")
            .r#where("id", Operator::Equal)
            .or()
            .r#where("age", Operator::LessThan)
            .and()
            .r#where("age", Operator::LessEqualsThan)
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT * FROM users WHERE id = ? OR age < ? AND age <= ?;"
        );
    }

    // ========================================
    // Joins
    // ========================================

    #[test]
    fn test_build_join() {
        let users = Table::from("users");

        let sql = select(["id", "name", "age"])
            .from(&users)
            .join(&users, "id")
            .table("credentials", "users_id")
            .join(&users, "id")
            .table("history", "users_id")
            .r#where("id", Operator::Equal)
            .and()
            .r#where("name", Operator::Equal)
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT id, name, age FROM users JOIN credentials ON credentials.users_id = users.id JOIN history ON history.users_id = users.id WHERE id = ? AND name = ?;"
        );
    }

    #[test]
    fn test_counter_repeats_joins() {
        let sql = select(["name"])
            .with_counter()
            .from("users")
            .join("users", "id")
            .table("credentials", "users_id")
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT name, (SELECT count(*) FROM users JOIN credentials ON credentials.users_id = users.id) as total FROM users JOIN credentials ON credentials.users_id = users.id;"
        );
    }

    #[test]
    fn test_join_mismatch_is_rejected() {
        let mut state = select(["id"])
            .from("users")
            .join("users", "id")
            .table("credentials", "users_id")
            .into_state();
        state.joins.push(TableInfo::new("users", "id"));

        assert_eq!(
            SqlGenerator::build_statement(&state),
            Err(BuilderError::JoinMismatch)
        );
    }

    // ========================================
    // Pagination
    // ========================================

    #[test]
    fn test_limit_after_from_defaults_zero_limit() {
        let sql = select_all().from("users").limit(0, 0).build().unwrap();
        assert_eq!(sql, "SELECT * FROM users LIMIT 0, 10;");
    }

    #[test]
    fn test_limit_after_from_keeps_explicit_limit() {
        let sql = select_all().from("users").limit(5, 25).build().unwrap();
        assert_eq!(sql, "SELECT * FROM users LIMIT 5, 25;");
    }

    // Known quirk: only the post-FROM stage substitutes the default page size.
    #[test]
    fn test_limit_after_where_passes_zero_through() {
        let sql = select_all()
            .from("users")
            .r#where("id", Operator::Equal)
            .limit(0, 0)
            .build()
            .unwrap();

        assert_eq!(sql, "SELECT * FROM users WHERE id = ?;");
    }

    #[test]
    fn test_limit_after_order_by_passes_zero_through() {
        let sql = select_all()
            .from("users")
            .r#where("id", Operator::Equal)
            .order_by(OrderType::Asc, ["id"])
            .limit(30, 0)
            .build()
            .unwrap();

        assert_eq!(sql, "SELECT * FROM users WHERE id = ? ORDER BY id LIMIT 30, 0;");
    }

    #[test]
    fn test_negative_pagination_is_omitted() {
        let sql = select_all()
            .from("users")
            .r#where("id", Operator::Equal)
            .limit(-1, 10)
            .build()
            .unwrap();

        assert_eq!(sql, "SELECT * FROM users WHERE id = ?;");
    }

    // ========================================
    // UPDATE rendering
    // ========================================

    #[test]
    fn test_build_update() {
        let sql = update("users")
            .set("name", Operator::Equal)
            .set("age", Operator::Equal)
            .r#where("id", Operator::Equal)
            .or()
            .r#where("age", Operator::GreaterThan)
            .build()
            .unwrap();

        assert_eq!(sql, "UPDATE users SET name = ?, age = ? WHERE id = ? OR age > ?;");
    }

    #[test]
    fn test_update_single_set_has_no_separator() {
        let sql = update("users")
            .set("name", Operator::Equal)
            .r#where("id", Operator::Equal)
            .build()
            .unwrap();

        assert_eq!(sql, "UPDATE users SET name = ? WHERE id = ?;");
    }

    #[test]
    fn test_update_where_chain_keeps_unions() {
        let builder = update("users")
            .set("age", Operator::Equal)
            .r#where("id", Operator::Equal)
            .and()
            .r#where("name", Operator::Equal);

        assert_eq!(builder.state().wheres()[0].connector, Some(Connector::And));
        assert_eq!(builder.state().placeholder_count(), 3);
        assert_eq!(
            builder.build().unwrap(),
            "UPDATE users SET age = ? WHERE id = ? AND name = ?;"
        );
    }

    #[test]
    fn test_update_trims_trailing_space() {
        let state = update("users").set("age", Operator::Equal).into_state();
        assert_eq!(SqlGenerator::update_statement(&state), "UPDATE users SET age = ?;");
    }

    // ========================================
    // Structural errors
    // ========================================

    #[test]
    fn test_missing_from_clause() {
        let result = select(["id"]).from("").build();
        assert_eq!(result, Err(BuilderError::MissingFromClause));
    }

    #[test]
    fn test_missing_order_fields() {
        let result = select_all()
            .from("users")
            .r#where("id", Operator::Equal)
            .order_by(OrderType::Desc, Vec::<&str>::new())
            .limit(0, 10)
            .build();

        assert_eq!(result, Err(BuilderError::MissingOrderFields));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let mut state = QueryState::new(Action::Delete);
        state.table.name = Table::from("users");

        assert_eq!(
            SqlGenerator::build_statement(&state),
            Err(BuilderError::MissingAction)
        );
        assert_eq!(
            SqlGenerator::build_statement(&QueryState::new(Action::Insert)),
            Err(BuilderError::MissingAction)
        );
    }

    #[test]
    fn test_join_check_runs_before_table_check() {
        let mut state = QueryState::new(Action::Select);
        state.joins.push(TableInfo::new("users", "id"));

        assert_eq!(
            SqlGenerator::build_statement(&state),
            Err(BuilderError::JoinMismatch)
        );
    }

    // ========================================
    // Properties
    // ========================================

    #[test]
    fn test_identical_chains_render_identically() {
        let build = || {
            select(["id", "name"])
                .with_counter()
                .from("users")
                .join("users", "id")
                .table("credentials", "users_id")
                .r#where("name", Operator::Equal)
                .order_by(OrderType::Asc, ["id"])
                .limit(10, 10)
                .build()
                .unwrap()
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_placeholder_count_matches_rendered_text() {
        let select_chain = select_all()
            .with_counter()
            .from("users")
            .r#where("id", Operator::Equal)
            .and()
            .r#where("name", Operator::Equal)
            .and()
            .r#where("age", Operator::GreaterThan);
        let expected = select_chain.state().placeholder_count();
        let sql = select_chain.build().unwrap();
        assert_eq!(expected, 6);
        assert_eq!(sql.matches('?').count(), expected);

        let update_chain = update("users")
            .set("name", Operator::Equal)
            .set("age", Operator::Equal)
            .r#where("id", Operator::Equal);
        let expected = update_chain.state().placeholder_count();
        let sql = update_chain.build().unwrap();
        assert_eq!(expected, 3);
        assert_eq!(sql.matches('?').count(), expected);
    }

    #[test]
    fn test_last_condition_has_no_connector() {
        let state = select_all()
            .from("users")
            .r#where("id", Operator::Equal)
            .and()
            .r#where("name", Operator::Equal)
            .into_state();

        assert!(state.wheres()[0].connector.is_some());
        assert!(state.wheres()[1].connector.is_none());
    }
}
