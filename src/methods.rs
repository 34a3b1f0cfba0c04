//! RemoteControl method table.
//!
//! Every RemoteControl operation is a thin wrapper forwarding its remote
//! name and arguments to [`Client::call`]; all interesting behavior lives
//! in the dispatch path. Remote spellings occasionally differ from the
//! local snake_case names.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;

macro_rules! api_methods {
    ($($name:ident => $rpc:literal),+ $(,)?) => {
        /// Remote method names reachable through the named wrappers.
        pub const METHOD_NAMES: &[&str] = &[$($rpc),+];

        impl Client {
            $(
                #[doc = concat!("Invoke the `", $rpc, "` method on the endpoint.")]
                pub fn $name(&mut self, params: Vec<Value>) -> Result<Value> {
                    self.call($rpc, params)
                }
            )+
        }
    };
}

api_methods! {
    activate_survey => "activate_survey",
    activate_tokens => "activate_tokens",
    add_group => "add_group",
    add_language => "add_language",
    add_participants => "add_participants",
    add_response => "add_response",
    add_survey => "add_survey",
    copy_survey => "copy_survey",
    cpd_import_participants => "cpd_importParticipants",
    delete_group => "delete_group",
    delete_language => "delete_language",
    delete_participants => "delete_participants",
    delete_question => "delete_question",
    delete_survey => "delete_survey",
    export_responses => "export_responses",
    export_responses_by_token => "export_responses_by_token",
    export_statistics => "export_statistics",
    export_timeline => "export_timeline",
    get_group_properties => "get_group_properties",
    get_language_properties => "get_language_properties",
    get_participant_properties => "get_participant_properties",
    get_question_properties => "get_question_properties",
    get_response_ids => "get_response_ids",
    get_session_key => "get_session_key",
    get_site_settings => "get_site_settings",
    get_summary => "get_summary",
    get_survey_properties => "get_survey_properties",
    get_uploaded_files => "get_uploaded_files",
    import_group => "import_group",
    import_question => "import_question",
    import_survey => "import_survey",
    invite_participants => "invite_participants",
    list_groups => "list_groups",
    list_participants => "list_participants",
    list_questions => "list_questions",
    list_surveys => "list_surveys",
    list_users => "list_users",
    mail_registered_participants => "mail_registered_participants",
    release_session_key => "release_session_key",
    remind_participants => "remind_participants",
    set_group_properties => "set_group_properties",
    set_language_properties => "set_language_properties",
    set_participant_properties => "set_participant_properties",
    set_question_properties => "set_question_properties",
    set_quota_properties => "set_quota_properties",
    set_survey_properties => "set_survey_properties",
    update_response => "update_response",
    upload_file => "upload_file",
}
