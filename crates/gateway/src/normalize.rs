//! Payload shaping on the way out and normalization on the way in.

use crate::types::*;

/// Keep ASCII digits only.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Integer value of a loosely typed field; empty, unparsable or absent is 0.
/// Decimals are truncated toward zero.
pub fn coerce_number(value: Option<&str>) -> i64 {
    let Some(v) = value.map(str::trim) else { return 0 };
    v.parse::<i64>()
        .ok()
        .or_else(|| v.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        .unwrap_or(0)
}

/// Date part of an ISO-8601 date-time (text before the first `T`); absent is empty.
pub fn date_only(value: Option<&str>) -> String {
    match value {
        Some(v) => match v.find('T') {
            Some(idx) => v[..idx].to_string(),
            None => v.to_string(),
        },
        None => String::new(),
    }
}

impl From<ClienteRaw> for ClienteResponse {
    fn from(raw: ClienteRaw) -> Self {
        Self {
            id: raw.id,
            nome: raw.nome,
            cpf: raw.cpf,
            email: raw.email,
            data_nascimento: date_only(raw.data_nascimento.as_deref()),
            data_cadastro: date_only(raw.data_cadastro.as_deref()),
            endereco_response_dto: raw.endereco.map(EnderecoResponse::from),
            contato_response_dto: raw.contato.map(ContatoResponse::from),
        }
    }
}

impl From<EnderecoRaw> for EnderecoResponse {
    fn from(raw: EnderecoRaw) -> Self {
        Self {
            logradouro: raw.logradouro,
            numero: raw.numero,
            complemento: raw.complemento,
            bairro: raw.bairro,
            cidade: raw.cidade,
            uf: raw.uf,
            cep: raw.cep,
        }
    }
}

impl From<ContatoRaw> for ContatoResponse {
    fn from(raw: ContatoRaw) -> Self {
        Self { ddi: raw.ddi, ddd: raw.ddd, celular: raw.celular }
    }
}

impl From<&ClienteForm> for ClienteRequestPayload {
    fn from(form: &ClienteForm) -> Self {
        Self {
            nome: form.nome.clone(),
            cpf: form.cpf.as_deref().map(only_digits),
            email: form.email.clone(),
            data_nascimento: form.data_nascimento.clone(),
            endereco_request_dto: form.endereco_request_dto.as_ref().map(EnderecoRequest::from),
            contato_request_dto: form.contato_request_dto.as_ref().map(ContatoRequest::from),
        }
    }
}

impl From<&EnderecoForm> for EnderecoRequest {
    fn from(form: &EnderecoForm) -> Self {
        Self {
            logradouro: form.logradouro.clone(),
            numero: coerce_number(form.numero.as_deref()),
            complemento: form.complemento.clone(),
            bairro: form.bairro.clone(),
            cidade: form.cidade.clone(),
            uf: form.uf.clone(),
            cep: form.cep.as_deref().map(only_digits),
        }
    }
}

impl From<&ContatoForm> for ContatoRequest {
    fn from(form: &ContatoForm) -> Self {
        Self {
            ddi: coerce_number(form.ddi.as_deref()),
            ddd: coerce_number(form.ddd.as_deref()),
            celular: form.celular.as_deref().map(only_digits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_only_truncates_at_t() {
        assert_eq!(date_only(Some("2024-05-01T00:00:00Z")), "2024-05-01");
        assert_eq!(date_only(Some("1990-12-31T23:59:59.123-03:00")), "1990-12-31");
        assert_eq!(date_only(None), "");
    }

    #[test]
    fn date_only_is_idempotent() {
        for input in ["2024-05-01T10:00:00Z", "2024-05-01", ""] {
            let once = date_only(Some(input));
            assert_eq!(date_only(Some(&once)), once);
        }
    }

    #[test]
    fn null_endereco_stays_absent() {
        let raw: ClienteRaw = serde_json::from_value(json!({
            "dataCadastro": "2024-05-01T00:00:00Z",
            "endereco": null
        }))
        .unwrap();
        let normalized = ClienteResponse::from(raw);
        assert_eq!(normalized.data_cadastro, "2024-05-01");
        assert_eq!(normalized.data_nascimento, "");
        assert!(normalized.endereco_response_dto.is_none());

        let out = serde_json::to_value(&normalized).unwrap();
        assert_eq!(out["dataCadastro"], "2024-05-01");
        assert!(out.get("enderecoResponseDto").is_none());
        assert!(out.get("contatoResponseDto").is_none());
    }

    #[test]
    fn nested_records_are_rebuilt_field_by_field() {
        let raw: ClienteRaw = serde_json::from_value(json!({
            "id": 3,
            "nome": "Maria",
            "cpf": "12345678900",
            "endereco": { "logradouro": "Rua A", "numero": 10, "cep": "01001000" },
            "contato": { "ddi": 55, "ddd": 11, "celular": "11912345678" }
        }))
        .unwrap();
        let normalized = ClienteResponse::from(raw);
        assert_eq!(normalized.cpf.as_deref(), Some("12345678900"));
        let endereco = normalized.endereco_response_dto.unwrap();
        assert_eq!(endereco.logradouro.as_deref(), Some("Rua A"));
        assert_eq!(endereco.numero, Some(10));
        assert_eq!(endereco.bairro, None);
        let contato = normalized.contato_response_dto.unwrap();
        assert_eq!(contato.ddd, Some(11));
        assert_eq!(contato.celular.as_deref(), Some("11912345678"));
    }

    #[test]
    fn empty_nested_object_is_still_present() {
        let raw: ClienteRaw = serde_json::from_value(json!({ "contato": {} })).unwrap();
        let normalized = ClienteResponse::from(raw);
        assert_eq!(normalized.contato_response_dto, Some(ContatoResponse::default()));
    }

    #[test]
    fn payload_without_id_still_normalizes() {
        let raw: ClienteRaw = serde_json::from_value(json!({
            "nome": "Sem Id",
            "dataCadastro": "2024-01-02T03:04:05"
        }))
        .unwrap();
        let normalized = ClienteResponse::from(raw);
        assert_eq!(normalized.id, None);
        assert_eq!(normalized.data_cadastro, "2024-01-02");
    }

    #[test]
    fn create_payload_is_shaped() {
        let form: ClienteForm = serde_json::from_value(json!({
            "cpf": "123.456.789-00",
            "contatoRequestDto": { "celular": "(11) 91234-5678", "ddd": "11", "ddi": "" }
        }))
        .unwrap();
        let payload = ClienteRequestPayload::from(&form);
        assert_eq!(payload.cpf.as_deref(), Some("12345678900"));
        let contato = payload.contato_request_dto.clone().unwrap();
        assert_eq!(contato.celular.as_deref(), Some("11912345678"));
        assert_eq!(contato.ddd, 11);
        assert_eq!(contato.ddi, 0);

        let out = serde_json::to_value(&payload).unwrap();
        assert_eq!(out["contatoRequestDto"], json!({ "ddi": 0, "ddd": 11, "celular": "11912345678" }));
        assert!(out.get("enderecoRequestDto").is_none());
    }

    #[test]
    fn endereco_numbers_default_to_zero() {
        let form = EnderecoForm {
            numero: Some("s/n".into()),
            cep: Some("01001-000".into()),
            ..EnderecoForm::default()
        };
        let req = EnderecoRequest::from(&form);
        assert_eq!(req.numero, 0);
        assert_eq!(req.cep.as_deref(), Some("01001000"));

        let missing = EnderecoRequest::from(&EnderecoForm::default());
        assert_eq!(missing.numero, 0);
    }

    #[test]
    fn numeric_form_fields_accept_json_numbers() {
        let form: ContatoForm = serde_json::from_value(json!({ "ddi": 55, "ddd": " 21 " })).unwrap();
        let req = ContatoRequest::from(&form);
        assert_eq!(req.ddi, 55);
        assert_eq!(req.ddd, 21);
        assert_eq!(req.celular, None);
    }

    #[test]
    fn coerce_number_edge_cases() {
        assert_eq!(coerce_number(Some("")), 0);
        assert_eq!(coerce_number(Some("abc")), 0);
        assert_eq!(coerce_number(Some("42")), 42);
        assert_eq!(coerce_number(None), 0);
    }

    #[test]
    fn decimal_input_is_truncated() {
        assert_eq!(coerce_number(Some("12.0")), 12);
        assert_eq!(coerce_number(Some(" 7.9 ")), 7);
        assert_eq!(coerce_number(Some("-3.5")), -3);
        assert_eq!(coerce_number(Some("NaN")), 0);
        assert_eq!(coerce_number(Some("inf")), 0);

        let form: EnderecoForm = serde_json::from_value(json!({ "numero": 10.0 })).unwrap();
        assert_eq!(EnderecoRequest::from(&form).numero, 10);
    }
}
