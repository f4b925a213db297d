//! Facade wiring: the prelude alone is enough to build a mapped schema

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use graphql_boot::prelude::*;
use graphql_boot::tools::StaticSchemaStringProvider;
use rstest::rstest;
use serde_json::json;

static CONFLICT: ErrorClass = ErrorClass::extends("ConflictError", &ANY_ERROR);

fn rename(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
	FieldFuture::new(async move {
		let name = ctx.args.try_get("name")?.string()?.to_string();
		if name == "taken" {
			return Err(GenericError::new(&CONFLICT, "name already taken").into_graphql_error());
		}
		Ok(Some(Value::from(name)))
	})
}

#[rstest]
#[tokio::test]
async fn test_prelude_builds_mapped_schema() {
	// Arrange
	let mapper = ErrorMapper::builder()
		.register(&CONFLICT, |error: &dyn ClassifiedError| {
			ErrorRecord::new(error.to_string()).with_classification("CONFLICT")
		})
		.unwrap()
		.build();
	let schema = GraphQLToolsAutoConfiguration::new(ToolsSettings::default())
		.schema_string_provider(StaticSchemaStringProvider::new([
			"type Query { ok: Boolean }",
			"type Mutation { rename(name: String!): String }",
		]))
		.resolver(ObjectResolver::query().field("ok", |_| {
			FieldFuture::from_value(Some(Value::from(true)))
		}))
		.resolver(ObjectResolver::mutation().field("rename", rename))
		.error_mapper(mapper)
		.configure()
		.unwrap()
		.schema
		.unwrap();

	// Act
	let accepted = schema.execute(r#"mutation { rename(name: "ada") }"#).await;
	let rejected = schema.execute(r#"mutation { rename(name: "taken") }"#).await;

	// Assert
	assert_eq!(accepted.data.into_json().unwrap(), json!({ "rename": "ada" }));
	let error = serde_json::to_value(&rejected.errors[0]).unwrap();
	assert_eq!(error["message"], json!("name already taken"));
	assert_eq!(error["extensions"]["classification"], json!("CONFLICT"));
}
