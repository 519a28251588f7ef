//! User-facing conversation texts

pub const INTRO_ROUTES_BETWEEN: &str =
    "Для получения информации о рейсах вам необходимо будет ввести последовательно пункт отправления, \
     пункт прибытия, дату и тип транспорта.\n\nВведите пункт отправления (станция/вокзал/аэропорт и т.п.)";

pub const INTRO_ROUTE_STATIONS: &str =
    "Для получения информации о пунктах следования вам необходимо будет ввести последовательно пункт \
     отправления, пункт прибытия, дату и тип транспорта, после чего выбрать маршрут из списка.\n\n\
     Введите пункт отправления (станция/вокзал/аэропорт и т.п.)";

pub const PROMPT_ARRIVAL: &str =
    "Отлично! Введите пункт прибытия (станция/вокзал/аэропорт и т.п.)";

pub const UNKNOWN_STATION: &str =
    "Проверьте правильность введённого названия и попробуйте снова. Если же ввод правильный, \
     то такого пункта нет в моём справочнике и получить информацию о рейсах не удастся.";

pub fn date_prompt(horizon_year: i32) -> String {
    format!(
        "Принято! Введите дату в формате ДД.ММ.ГГГГ (сервис работает для текущей и будущих дат \
         в рамках {} года)",
        horizon_year
    )
}

pub const INVALID_DATE: &str =
    "Проверьте правильность введённой даты и попробуйте снова. Если же ввод правильный, \
     то по независящим от меня причинам получить информацию о рейсах не удастся.";

pub const PROMPT_TRANSPORT: &str = "Принято! Введите вид транспорта";

pub const PROMPT_TRANSPORT_AFTER_DATE: &str = "Запомнил! Введите тип транспорта";

pub const SEARCH_FAILED: &str =
    "Ошибка запроса - скорее всего, вы указали город пунктом отправления, а сервис требует \
     указывать станции, вокзалы, остановки и т.п. - например, Москва (Казанский вокзал) вместо Москва";

pub const INPUT_ERROR: &str = "Ошибка ввода. Попробуйте снова";

pub const ITINERARY_FAILED: &str = "Ошибка запроса к API. Попробуйте повторить запрос позже";

pub const SESSION_BROKEN: &str = "Что-то пошло не так. Начните поиск заново";
