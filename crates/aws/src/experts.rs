//! DynamoDB expert directory client

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use kontrak_core::{Error, Expert, ExpertDirectory, Result};

/// Expert directory backed by a DynamoDB table with a `specialization`
/// attribute.
#[derive(Clone)]
pub struct DynamoDbExpertDirectory {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoDbExpertDirectory {
    pub fn new(client: aws_sdk_dynamodb::Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ExpertDirectory for DynamoDbExpertDirectory {
    async fn find_by_specializations(&self, specializations: &[String]) -> Result<Vec<Expert>> {
        if specializations.is_empty() {
            return Ok(Vec::new());
        }

        // OR-filter over the specialization attribute, one placeholder per
        // requested label.
        let filter = (0..specializations.len())
            .map(|i| format!("#spec = :s{i}"))
            .collect::<Vec<_>>()
            .join(" OR ");

        let mut scan = self
            .client
            .scan()
            .table_name(&self.table)
            .filter_expression(filter)
            .expression_attribute_names("#spec", "specialization");

        for (i, spec) in specializations.iter().enumerate() {
            scan = scan.expression_attribute_values(
                format!(":s{i}"),
                AttributeValue::S(spec.clone()),
            );
        }

        let output = scan
            .send()
            .await
            .map_err(|e| Error::service("dynamodb", e))?;

        let experts = output
            .items()
            .iter()
            .filter_map(parse_expert)
            .collect();

        Ok(experts)
    }
}

fn parse_expert(item: &HashMap<String, AttributeValue>) -> Option<Expert> {
    let string_attr = |name: &str| -> Option<String> {
        item.get(name).and_then(|v| v.as_s().ok()).cloned()
    };

    Some(Expert {
        id: string_attr("id")?,
        name: string_attr("name")?,
        specialization: string_attr("specialization")?,
        location: string_attr("location"),
        phone: string_attr("phone"),
        email: string_attr("email"),
    })
}
