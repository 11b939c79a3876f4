use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response to `ListBuckets`.
///
/// - [ListBuckets](https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListBuckets.html)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListBucketsResponse {
    pub buckets: Buckets,
    pub owner: Owner,
}

/// Wrapper element around the bucket list.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Buckets {
    #[serde(default, rename = "Bucket")]
    pub bucket: Vec<BucketInfo>,
}

/// - [Bucket](https://docs.aws.amazon.com/AmazonS3/latest/API/API_Bucket.html)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BucketInfo {
    pub name: String,
    pub creation_date: DateTime<Utc>,
}

/// Response to `ListObjects`.
///
/// - [ListObjects](https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjects.html)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListObjectsResponse {
    pub common_prefixes: Vec<CommonPrefix>,
    pub contents: Vec<ObjectInfo>,
    pub delimiter: String,
    pub encoding_type: String,
    pub is_truncated: bool,
    pub marker: String,
    pub max_keys: i32,
    pub name: String,
    pub next_marker: String,
    pub prefix: String,
}

/// - [CommonPrefix](https://docs.aws.amazon.com/AmazonS3/latest/API/API_CommonPrefix.html)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct CommonPrefix {
    pub prefix: String,
}

/// - [Object](https://docs.aws.amazon.com/AmazonS3/latest/API/API_Object.html)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectInfo {
    pub key: String,
    #[serde(default)]
    pub e_tag: String,
    pub size: i64,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub storage_class: String,
    // Omitted unless the listing asks for owner information.
    #[serde(default)]
    pub owner: Owner,
}

/// - [Owner](https://docs.aws.amazon.com/AmazonS3/latest/API/API_Owner.html)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Owner {
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "ID")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_buckets_xml() {
        let body = r#"
            <ListAllMyBucketsResult>
              <Buckets>
                <Bucket>
                  <Name>mybucket</Name>
                  <CreationDate>2024-06-24T06:34:23Z</CreationDate>
                </Bucket>
              </Buckets>
              <Owner>
                <DisplayName>webfile</DisplayName>
                <ID>75aa57f09aa0c</ID>
              </Owner>
            </ListAllMyBucketsResult>"#;

        let got: ListBucketsResponse = quick_xml::de::from_str(body).expect("must decode");
        let want = ListBucketsResponse {
            buckets: Buckets {
                bucket: vec![BucketInfo {
                    name: "mybucket".to_string(),
                    creation_date: Utc.with_ymd_and_hms(2024, 6, 24, 6, 34, 23).unwrap(),
                }],
            },
            owner: Owner {
                display_name: "webfile".to_string(),
                id: "75aa57f09aa0c".to_string(),
            },
        };

        assert_eq!(got, want);
    }

    #[test]
    fn test_list_objects_xml() {
        let body = r#"
            <ListBucketResult>
              <IsTruncated>true</IsTruncated>
              <Marker/>
              <Name>mybucket</Name>
              <Prefix/>
              <MaxKeys>1000</MaxKeys>
              <Contents>
                <Key>data.txt</Key>
                <ETag>"8ddd8be4b179a529afa5f2ffae4b9858"</ETag>
                <Owner>
                  <DisplayName>webfile</DisplayName>
                  <ID>75aa57f</ID>
                </Owner>
                <Size>13</Size>
                <LastModified>2024-06-24T06:34:23Z</LastModified>
                <StorageClass>STANDARD</StorageClass>
              </Contents>
              <CommonPrefixes>
                <Prefix>string</Prefix>
              </CommonPrefixes>
            </ListBucketResult>"#;

        let got: ListObjectsResponse = quick_xml::de::from_str(body).expect("must decode");
        let want = ListObjectsResponse {
            common_prefixes: vec![CommonPrefix {
                prefix: "string".to_string(),
            }],
            contents: vec![ObjectInfo {
                key: "data.txt".to_string(),
                e_tag: "\"8ddd8be4b179a529afa5f2ffae4b9858\"".to_string(),
                size: 13,
                last_modified: Utc.with_ymd_and_hms(2024, 6, 24, 6, 34, 23).unwrap(),
                storage_class: "STANDARD".to_string(),
                owner: Owner {
                    display_name: "webfile".to_string(),
                    id: "75aa57f".to_string(),
                },
            }],
            is_truncated: true,
            max_keys: 1000,
            name: "mybucket".to_string(),
            ..Default::default()
        };

        assert_eq!(got, want);
    }
}
