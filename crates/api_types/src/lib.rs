use serde::{Deserialize, Serialize};

pub mod envelope {
    use super::*;

    /// Fixed top-level JSON wrapper the service returns for every call.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Envelope {
        pub rsp: Rsp,
    }

    /// Body of the wrapper.
    ///
    /// `stat` is `"ok"` on success; everything else is optional and depends
    /// on the operation that was invoked. Field names mirror the wire
    /// contract exactly.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Rsp {
        pub stat: String,
        /// Server-supplied failure message, present when `stat` is not `"ok"`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub errormsg: Option<String>,
        /// Result rows or scalar payload; shape varies per transaction.
        #[serde(default, rename = "Data", skip_serializing_if = "Option::is_none")]
        pub data: Option<serde_json::Value>,
        /// Column metadata for `Data`.
        #[serde(default, rename = "DataDef", skip_serializing_if = "Option::is_none")]
        pub data_def: Option<Vec<FieldDef>>,
        #[serde(default, rename = "Transaction", skip_serializing_if = "Option::is_none")]
        pub transaction: Option<String>,
        #[serde(default, rename = "CurrViewName", skip_serializing_if = "Option::is_none")]
        pub curr_view_name: Option<String>,
        /// Query string the server generated for the call.
        #[serde(default, rename = "SQL", skip_serializing_if = "Option::is_none")]
        pub sql: Option<String>,
    }

    /// One column definition from `DataDef`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct FieldDef {
        #[serde(rename = "DisplayName")]
        pub display_name: String,
        #[serde(rename = "ColNum")]
        pub col_num: i64,
    }
}
